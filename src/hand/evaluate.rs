use serde::{Deserialize, Serialize};

use super::point::*;
use super::shanten::{shanten, Decomposition};
use super::yaku::*;
use crate::error::{Error, Result};
use crate::model::*;
use crate::util::common::count_dora;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Riichi {
    #[default]
    None,
    Single,
    Double,
}

// 和了時の状況
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WinCondition {
    pub round_wind: Tnum,            // 場風 (東: 1, 南: 2, 西: 3, 北: 4)
    pub seat_wind: Tnum,             // 自風 (同上) 東家が親
    pub dora_indicators: Vec<Tile>,  // ドラ表示牌 (注:ドラそのものではない)
    pub ura_indicators: Vec<Tile>,   // 裏ドラ表示牌 立直時のみ有効
    pub aka: usize,                  // 赤ドラの枚数
    pub is_tsumo: bool,              // ツモ和了
    pub riichi: Riichi,              // 立直, 両立直
    pub ippatsu: bool,               // 一発
    pub rinshan_ron: bool,           // 槍槓
    pub rinshan_tsumo: bool,         // 嶺上開花
    pub haitei: bool,                // 最後の牌 (ツモなら海底, ロンなら河底)
    pub first_turn: bool,            // 第一ツモ (親なら天和, 子なら地和)
}

impl Default for WinCondition {
    fn default() -> Self {
        Self {
            round_wind: WE,
            seat_wind: WE,
            dora_indicators: vec![],
            ura_indicators: vec![],
            aka: 0,
            is_tsumo: false,
            riichi: Riichi::None,
            ippatsu: false,
            rinshan_ron: false,
            rinshan_tsumo: false,
            haitei: false,
            first_turn: false,
        }
    }
}

impl WinCondition {
    #[inline]
    pub fn is_dealer(&self) -> bool {
        self.seat_wind == WE
    }

    // 場風と自風は東南西北のいずれか
    pub fn validate(&self) -> Result<()> {
        for (name, w) in [("round_wind", self.round_wind), ("seat_wind", self.seat_wind)] {
            if !(WE..=WN).contains(&w) {
                return Err(Error::InvalidArgument(format!("{}: {}", name, w)));
            }
        }
        Ok(())
    }

    fn yaku_flags(&self, is_closed: bool) -> YakuFlags {
        let tsumo = self.is_tsumo;
        YakuFlags {
            menzentsumo: tsumo && is_closed,
            riichi: self.riichi != Riichi::None,
            dabururiichi: self.riichi == Riichi::Double,
            ippatsu: self.ippatsu && self.riichi != Riichi::None,
            haiteiraoyue: self.haitei && tsumo,
            houteiraoyui: self.haitei && !tsumo,
            rinshankaihou: self.rinshan_tsumo && tsumo,
            chankan: self.rinshan_ron && !tsumo,
            tenhou: self.first_turn && tsumo && self.is_dealer(),
            tiihou: self.first_turn && tsumo && !self.is_dealer(),
        }
    }
}

// 和了の評価結果. points == 0 は無役
#[derive(Debug, Clone, Serialize)]
pub struct Score {
    pub points: Point,         // ロン和了の点数 (ツモの場合の支払いはpaymentsを参照)
    pub fu: usize,
    pub fan: usize,            // ドラを含む翻数
    pub yaku: Vec<(String, usize)>,    // (役名, 翻数) ドラを含む
    pub yakuman: Vec<(String, usize)>, // (役名, 倍数)
    pub yakuman_count: usize,  // 役満の倍数の合計
    pub payments: Points,      // (ロン, ツモの親の支払い, ツモの子の支払い)
    pub title: String,
    pub decomposition: Option<Decomposition>, // 採用した和了形の解釈
}

impl Score {
    fn no_yaku() -> Self {
        Self {
            points: 0,
            fu: 0,
            fan: 0,
            yaku: vec![],
            yakuman: vec![],
            yakuman_count: 0,
            payments: (0, 0, 0),
            title: String::new(),
            decomposition: None,
        }
    }

    #[inline]
    pub fn has_yaku(&self) -> bool {
        self.points > 0
    }

    // ツモ和了の合計点
    pub fn tsumo_total(&self, is_dealer: bool) -> Point {
        let (_, d, c) = self.payments;
        if is_dealer {
            d * 3
        } else {
            d + c * 2
        }
    }
}

// 和了形である場合,最も高得点となるような役の組み合わせのSome(Score)を返却
// 和了形でない場合,Noneを返却
// 和了形でも無役の場合はScoreの中身がyaku: [], points: 0となる
// この関数は本場数や供託の得点を計算しない
pub fn evaluate_hand(
    hand: &Hand,        // 和了牌を含まない手牌 (13枚)
    winning_tile: Tile, // 上がり牌
    cond: &WinCondition,
) -> Option<Score> {
    if cond.validate().is_err() {
        return None;
    }
    let full = hand.with(winning_tile);
    let res = shanten(&full);
    if res.shanten != -1 {
        return None; // 和了形以外
    }

    let is_open = !full.is_closed();
    let is_dealer = cond.is_dealer();
    let yf = cond.yaku_flags(!is_open);
    let n_dora = count_dora(&full, &cond.dora_indicators);
    let n_red_dora = cond.aka;
    let n_ura_dora = if cond.riichi != Riichi::None {
        count_dora(&full, &cond.ura_indicators)
    } else {
        0
    };

    let mut best: Option<Score> = None;
    for d in &res.decompositions {
        for (wait, completed) in wait_patterns(d, winning_tile) {
            let ctx = YakuContext::new(
                *full.concealed(),
                d,
                winning_tile,
                wait,
                completed,
                cond.round_wind,
                cond.seat_wind,
                cond.is_tsumo,
                is_open,
                yf,
            );

            let (yakus, is_yakuman, mut fan) = ctx.calc_yaku();
            if yakus.is_empty() {
                continue; // 無役
            }

            let fu = ctx.calc_fu();
            let mut yaku = vec![];
            let mut yakuman = vec![];
            let mut yakuman_count = 0;
            if is_yakuman {
                yakuman = yakus
                    .iter()
                    .map(|y| (y.name.to_string(), y.fan_close - 12))
                    .collect();
                yakuman_count = fan;
                fan = 0;
            } else {
                yaku = yakus
                    .iter()
                    .map(|y| (y.name.to_string(), y.fan(is_open)))
                    .collect();
                for (name, n) in [
                    ("ドラ", n_dora),
                    ("赤ドラ", n_red_dora),
                    ("裏ドラ", n_ura_dora),
                ] {
                    if n != 0 {
                        fan += n;
                        yaku.push((name.to_string(), n));
                    }
                }
            }

            let (payments, title) = calc_points(is_dealer, fu, fan, yakuman_count);
            let score = Score {
                points: payments.0,
                fu,
                fan,
                yaku,
                yakuman,
                yakuman_count,
                payments,
                title,
                decomposition: Some(d.clone()),
            };

            // 和了形に複数の解釈が可能な場合,最も得点の高いものを採用
            let key = |s: &Score| (s.points, s.fan, s.fu);
            if best.as_ref().map_or(true, |b| key(&score) > key(b)) {
                best = Some(score);
            }
        }
    }

    Some(best.unwrap_or_else(Score::no_yaku))
}

// 和了できない場合はエラーを返却する版
pub fn score(hand: &Hand, winning_tile: Tile, cond: &WinCondition) -> Result<Score> {
    cond.validate()?;
    match evaluate_hand(hand, winning_tile, cond) {
        None => Err(Error::NotWinningHand),
        Some(s) if !s.has_yaku() => Err(Error::NoYaku),
        Some(s) => Ok(s),
    }
}

#[cfg(test)]
fn eval(exp: &str, wt: &str, cond: &WinCondition) -> Option<Score> {
    evaluate_hand(&exp.parse().unwrap(), wt.parse().unwrap(), cond)
}

#[cfg(test)]
fn yaku_names(s: &Score) -> Vec<&str> {
    s.yaku
        .iter()
        .chain(s.yakuman.iter())
        .map(|(name, _)| name.as_str())
        .collect()
}

#[test]
fn test_seat_wind_ron() {
    let cond = WinCondition {
        round_wind: WE,
        seat_wind: WS,
        ..Default::default()
    };
    let s = eval("234m567p78s55m<2z2z2z>", "9s", &cond).unwrap();
    assert_eq!(yaku_names(&s), vec!["自風"]);
    assert_eq!((s.fu, s.fan, s.points), (30, 1, 1000));
}

#[test]
fn test_pinfu() {
    let tsumo = WinCondition {
        seat_wind: WS,
        is_tsumo: true,
        ..Default::default()
    };
    let s = eval("234m567p23478s99m", "9s", &tsumo).unwrap();
    assert!(yaku_names(&s).contains(&"平和"));
    assert!(yaku_names(&s).contains(&"門前清自摸和"));
    assert_eq!((s.fu, s.fan), (20, 2));
    assert_eq!(s.payments, (1300, 700, 400));

    let ron = WinCondition {
        seat_wind: WS,
        ..Default::default()
    };
    let s = eval("234m567p23478s99m", "9s", &ron).unwrap();
    assert_eq!(yaku_names(&s), vec!["平和"]);
    assert_eq!((s.fu, s.points), (30, 1000));
}

#[test]
fn test_no_yaku() {
    let cond = WinCondition {
        seat_wind: WS,
        dora_indicators: vec![Tile(TM, 1)],
        ..Default::default()
    };
    let s = eval("234m567p78s99m<5p6p7p>", "9s", &cond).unwrap();
    assert!(!s.has_yaku());
    assert_eq!(s.points, 0);
    assert!(s.yaku.is_empty());

    let r = score(&"234m567p78s99m<5p6p7p>".parse().unwrap(), Tile(TS, 9), &cond);
    assert_eq!(r.err(), Some(Error::NoYaku));
    let r = score(&"234m567p78s99m<5p6p7p>".parse().unwrap(), Tile(TS, 1), &cond);
    assert_eq!(r.err(), Some(Error::NotWinningHand));
}

#[test]
fn test_dora() {
    let cond = WinCondition {
        seat_wind: WS,
        riichi: Riichi::Single,
        dora_indicators: vec![Tile(TM, 1)],
        ura_indicators: vec![Tile(TM, 8)],
        aka: 1,
        ..Default::default()
    };
    let s = eval("234m567p23478s99m", "9s", &cond).unwrap();
    // 立直, 平和, ドラ1, 赤ドラ1, 裏ドラ2
    assert_eq!(s.fan, 6);
    assert_eq!(s.title, "跳満");
    assert_eq!(s.points, 12000);

    let no_riichi = WinCondition {
        riichi: Riichi::None,
        ..cond
    };
    let s = eval("234m567p23478s99m", "9s", &no_riichi).unwrap();
    assert_eq!(s.fan, 3);
}

#[test]
fn test_highest_interpretation() {
    // 二盃口(+平和)と七対子の両方に解釈できる
    let cond = WinCondition {
        seat_wind: WS,
        ..Default::default()
    };
    let s = eval("223344m556677p8s", "8s", &cond).unwrap();
    assert!(yaku_names(&s).contains(&"二盃口"));
    assert!(!yaku_names(&s).contains(&"七対子"));

    // 三暗刻 (ツモ) > 一盃口
    let tsumo = WinCondition {
        seat_wind: WS,
        is_tsumo: true,
        ..Default::default()
    };
    let s = eval("111222333m789p5s", "5s", &tsumo).unwrap();
    assert!(yaku_names(&s).contains(&"三暗刻"));
}

#[test]
fn test_chiitoitsu() {
    let cond = WinCondition {
        seat_wind: WS,
        ..Default::default()
    };
    let s = eval("11m22p33s44m55p66s7z", "7z", &cond).unwrap();
    assert_eq!(yaku_names(&s), vec!["七対子"]);
    assert_eq!((s.fu, s.fan, s.points), (25, 2, 1600));
}

#[test]
fn test_yakuman() {
    let cond = WinCondition {
        seat_wind: WS,
        ..Default::default()
    };
    let s = eval("19m19p19s1234567z", "1m", &cond).unwrap();
    assert_eq!(yaku_names(&s), vec!["国士無双十三面待ち"]);
    assert_eq!(s.yakuman_count, 2);
    assert_eq!(s.points, 64000);

    let s = eval("19m19p19s1234566z", "7z", &cond).unwrap();
    assert_eq!(yaku_names(&s), vec!["国士無双"]);
    assert_eq!(s.points, 32000);

    // 四暗刻単騎(2) + 字一色(1) + 大四喜(2)
    let s = eval("111222333444z5z", "5z", &cond).unwrap();
    assert_eq!(s.yakuman_count, 5);
    assert!(s.yaku.is_empty());

    // ロンのシャンポン待ちは三暗刻
    let s = eval("111m222p333s44z55z", "5z", &cond).unwrap();
    assert!(yaku_names(&s).contains(&"三暗刻"));
    assert!(yaku_names(&s).contains(&"対々和"));
    assert_eq!(s.yakuman_count, 0);
    let tsumo = WinCondition {
        is_tsumo: true,
        ..cond.clone()
    };
    let s = eval("111m222p333s44z55z", "5z", &tsumo).unwrap();
    assert_eq!(yaku_names(&s), vec!["四暗刻"]);
}

#[test]
fn test_daisangen_and_chuuren() {
    let cond = WinCondition {
        seat_wind: WS,
        ..Default::default()
    };
    let s = eval("5z5z5z6z6z6z78m99p<7z7z7z>", "9m", &cond).unwrap();
    assert_eq!(yaku_names(&s), vec!["大三元"]);

    let s = eval("1112345678999m", "5m", &cond).unwrap();
    assert_eq!(yaku_names(&s), vec!["純正九蓮宝燈"]);
    assert_eq!(s.yakuman_count, 2);
}

#[test]
fn test_situational_yaku() {
    let cond = WinCondition {
        seat_wind: WE,
        is_tsumo: true,
        first_turn: true,
        ..Default::default()
    };
    let s = eval("234m567p23478s99m", "9s", &cond).unwrap();
    assert_eq!(yaku_names(&s), vec!["天和"]);
    assert_eq!(s.points, 48000);

    let cond = WinCondition {
        seat_wind: WW,
        haitei: true,
        ..Default::default()
    };
    let s = eval("234m567p78s99m<5p6p7p>", "9s", &cond).unwrap();
    assert_eq!(yaku_names(&s), vec!["河底撈魚"]);

    let cond = WinCondition {
        seat_wind: WW,
        rinshan_ron: true,
        ..Default::default()
    };
    let s = eval("234m567p78s99m<5p6p7p>", "9s", &cond).unwrap();
    assert_eq!(yaku_names(&s), vec!["槍槓"]);
}

#[test]
fn test_invalid_wind() {
    let cond = WinCondition {
        seat_wind: 10,
        ..Default::default()
    };
    let h: Hand = "234m567p23478s99m".parse().unwrap();
    let wt = Tile(TS, 9);
    assert!(matches!(
        score(&h, wt, &cond),
        Err(Error::InvalidArgument(_))
    ));
    assert!(evaluate_hand(&h, wt, &cond).is_none());

    let cond = WinCondition {
        round_wind: 0,
        ..Default::default()
    };
    assert!(cond.validate().is_err());
    assert!(WinCondition::default().validate().is_ok());
}
