use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::AiConfig;
use crate::error::Error;
use crate::hand::*;
use crate::model::*;
use crate::util::common::create_dora_table;
use crate::util::misc::vec_count;

// Botから見える卓の情報
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TableView {
    pub seat: Seat,                   // 自分の座席
    pub dealer: Seat,                 // 親の座席
    pub round_wind: Tnum,             // 場風
    pub dora_indicators: Vec<Tile>,   // ドラ表示牌
    pub kawa: Vec<Tile>,              // 自分の河
    pub riichi: [bool; SEAT],         // 各プレイヤーのリーチ
    pub genbutsu: [Vec<Tile>; SEAT],  // 各プレイヤーに対する現物
    pub visible: Vec<Tile>,           // 自分の手牌以外で見えている牌 (河, 副露, ドラ表示牌)
    pub wall_count: usize,            // 牌山の残り枚数
}

impl Default for TableView {
    fn default() -> Self {
        Self {
            seat: 0,
            dealer: 0,
            round_wind: WE,
            dora_indicators: vec![],
            kawa: vec![],
            riichi: [false; SEAT],
            genbutsu: Default::default(),
            visible: vec![],
            wall_count: 70,
        }
    }
}

impl TableView {
    // 座席番号と場風の範囲チェック (jsonからの入力用)
    pub fn validate(&self) -> crate::Result<()> {
        if self.seat >= SEAT {
            return Err(Error::InvalidArgument(format!("seat: {}", self.seat)));
        }
        if self.dealer >= SEAT {
            return Err(Error::InvalidArgument(format!("dealer: {}", self.dealer)));
        }
        if !(WE..=WN).contains(&self.round_wind) {
            return Err(Error::InvalidArgument(format!("round_wind: {}", self.round_wind)));
        }
        Ok(())
    }

    #[inline]
    pub fn seat_wind(&self) -> Tnum {
        (self.seat + SEAT - self.dealer) % SEAT + 1 // WE | WS | WW | WN
    }

    #[inline]
    pub fn is_dealer(&self) -> bool {
        self.seat == self.dealer
    }

    #[inline]
    pub fn is_riichi(&self) -> bool {
        self.riichi[self.seat]
    }

    // 自分以外にリーチ者がいる
    pub fn is_riichi_other(&self) -> bool {
        (0..SEAT).any(|s| s != self.seat && self.riichi[s])
    }

    // この卓で和了した場合の状況
    pub fn win_condition(&self, is_tsumo: bool) -> WinCondition {
        WinCondition {
            round_wind: self.round_wind,
            seat_wind: self.seat_wind(),
            dora_indicators: self.dora_indicators.clone(),
            is_tsumo,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Bot {
    config: AiConfig,
}

impl Bot {
    pub fn new(config: AiConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    // 山に残っている(可能性のある)枚数
    fn remaining(&self, hand: &Hand, view: &TableView, t: Tile) -> i64 {
        let seen = vec_count(&view.visible, &t) + hand.count_all(t);
        TILE.saturating_sub(seen) as i64
    }

    // 14枚の手牌から切ることができる牌とその評価値を返却
    pub fn evaluate_discards(&self, hand: &Hand, view: &TableView) -> Vec<(Tile, i64)> {
        let cfg = &self.config;
        let (_, isolated) = split_isolated(hand.concealed());
        let dora = create_dora_table(&view.dora_indicators);
        let cond = view.win_condition(true);
        let mut cache = PatternCache::new();

        let mut res = vec![];
        for t in Tile::all().filter(|&t| hand.count(t) > 0) {
            let h = match hand.without(t) {
                Ok(h) => h,
                Err(_) => continue,
            };
            let sr = shanten_with_cache(&h, &mut cache);

            let mut point = cfg.shanten_step * (10 - sr.shanten as i64);
            if sr.shanten == 0 {
                // 聴牌時は待ちの広さと和了点
                point += cfg.tenpai_bonus;
                for w in machi(&h) {
                    if let Some(s) = evaluate_hand(&h, w, &cond) {
                        point += s.points as i64 * self.remaining(&h, view, w);
                    }
                }
            } else {
                point += sr
                    .decompositions
                    .iter()
                    .map(|d| self.element_point(d))
                    .max()
                    .unwrap_or(0);
            }

            if isolated.contains(&t) {
                point += cfg.isolated;
            }
            if view.kawa.contains(&t) {
                point += cfg.own_discard;
            }
            if dora[t.0][t.1] > 0 {
                point += cfg.dora;
            }
            for s in (0..SEAT).filter(|&s| s != view.seat && view.riichi[s]) {
                if view.genbutsu[s].contains(&t) {
                    point += cfg.genbutsu;
                    if s == view.dealer {
                        point += cfg.dealer_genbutsu;
                    }
                }
            }

            debug!("discard {}: shanten {}, point {}", t, sr.shanten, point);
            res.push((t, point));
        }
        res
    }

    // 分解に含まれる面子・塔子の評価
    fn element_point(&self, d: &Decomposition) -> i64 {
        if d.shape != HandShape::Standard {
            return 0;
        }

        let cfg = &self.config;
        let mut point = 0;
        if d.head.is_some() {
            point += cfg.head;
        }
        point += cfg.meld * d.melds.iter().filter(|b| !b.is_call()).count() as i64;
        for b in &d.partials {
            point += match b.0 {
                BlockType::Ryanmen => cfg.ryanmen,
                BlockType::Toitsu => cfg.toitsu,
                BlockType::Penchan => cfg.penchan,
                BlockType::Kanchan => cfg.kanchan,
                _ => 0,
            };
        }
        point
    }

    // 評価値が最大の牌のうち1つをランダムに選択
    pub fn choose_discard<R: Rng>(&self, hand: &Hand, view: &TableView, rng: &mut R) -> Option<Tile> {
        let scores = self.evaluate_discards(hand, view);
        let max = match scores.iter().map(|&(_, p)| p).max() {
            Some(m) => m,
            None => {
                warn!("no tile to discard: {}", hand);
                return None;
            }
        };
        let best: Vec<Tile> = scores
            .into_iter()
            .filter(|&(_, p)| p == max)
            .map(|(t, _)| t)
            .collect();
        let t = best.choose(rng).copied();
        debug!("choose discard: {:?} from {:?}", t, best);
        t
    }

    // 14枚の手牌からdiscardを切ってリーチするべきか
    pub fn should_riichi(&self, hand: &Hand, discard: Tile, view: &TableView) -> bool {
        let h = match hand.without(discard) {
            Ok(h) => h,
            Err(_) => return false,
        };
        if !can_riichi(&h, view, self.config.riichi_min_wall) {
            return false;
        }

        // 親ならリーチ
        if view.is_dealer() {
            return true;
        }

        // 待ちが広ければリーチ
        let waits = machi(&h);
        if waits.len() >= self.config.riichi_min_waits {
            return true;
        }

        // リーチしないと役がない
        let cond = view.win_condition(false);
        !waits.iter().any(|&w| {
            evaluate_hand(&h, w, &cond)
                .map(|s| s.has_yaku())
                .unwrap_or(false)
        })
    }
}

// リーチ可能な条件 (13枚の手牌)
pub fn can_riichi(hand: &Hand, view: &TableView, min_wall: usize) -> bool {
    hand.is_closed() && !view.is_riichi() && view.wall_count >= min_wall && is_tenpai(hand)
}

#[cfg(test)]
fn hand(exp: &str) -> Hand {
    exp.parse().unwrap()
}

#[cfg(test)]
fn view() -> TableView {
    TableView {
        seat: 1,
        dealer: 0,
        ..Default::default()
    }
}

#[test]
fn test_seat_wind() {
    let mut v = view();
    assert_eq!(v.seat_wind(), WS);
    v.dealer = 2;
    assert_eq!(v.seat_wind(), WN);
    v.seat = 2;
    assert!(v.is_dealer());
    assert_eq!(v.seat_wind(), WE);
}

#[test]
fn test_discard_isolated() {
    let bot = Bot::default();
    let h = hand("123m456p789s23s55m1z");
    let mut rng: rand::rngs::StdRng = rand::SeedableRng::seed_from_u64(0);
    assert_eq!(bot.choose_discard(&h, &view(), &mut rng), Some(Tile(TZ, 1)));
}

#[test]
fn test_discard_keeps_tenpai() {
    let bot = Bot::default();
    // 1pを切ると聴牌
    let h = hand("123m456p789s23s55m1p");
    let scores = bot.evaluate_discards(&h, &view());
    let best = scores.iter().max_by_key(|(_, p)| *p).unwrap();
    assert_eq!(best.0, Tile(TP, 1));
    assert!(best.1 > 10000);
}

#[test]
fn test_discard_tie_break() {
    use rand::SeedableRng;

    let bot = Bot::default();
    // 字牌の孤立牌はどれを切っても同点
    let h = hand("123m456p789s55m1z2z3z4z");
    let v = TableView {
        round_wind: WS,
        seat: 2,
        dealer: 0,
        ..Default::default()
    };
    let honors = tiles_from_string("1234z").unwrap();
    let scores = bot.evaluate_discards(&h, &v);
    let p = |t: Tile| scores.iter().find(|(x, _)| *x == t).unwrap().1;
    assert!(honors.iter().all(|&t| p(t) == p(honors[0])));

    let mut chosen = vec![];
    for seed in 0..20 {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let t = bot.choose_discard(&h, &v, &mut rng).unwrap();
        assert!(honors.contains(&t), "{}", t);
        if !chosen.contains(&t) {
            chosen.push(t);
        }
    }
    assert!(chosen.len() > 1);
}

#[test]
fn test_discard_genbutsu() {
    let bot = Bot::default();
    let h = hand("123m456p789s23s55m1z");
    let p = |v: &TableView| {
        let scores = bot.evaluate_discards(&h, v);
        scores.iter().find(|(x, _)| *x == Tile(TS, 2)).unwrap().1
    };
    let base = p(&view());

    // 親のリーチ
    let mut v = view();
    v.riichi[0] = true;
    v.genbutsu[0] = vec![Tile(TS, 2)];
    assert_eq!(p(&v) - base, 3000);

    // 子のリーチ
    let mut v = view();
    v.riichi[2] = true;
    v.genbutsu[2] = vec![Tile(TS, 2)];
    assert_eq!(p(&v) - base, 2000);

    // リーチしていないプレイヤーの現物は無関係
    let mut v = view();
    v.genbutsu[2] = vec![Tile(TS, 2)];
    assert_eq!(p(&v), base);
}

#[test]
fn test_discard_dora() {
    let bot = Bot::default();
    let h = hand("123m456p789s55m1z2z3z");
    let v = TableView {
        seat: 2,
        dealer: 0,
        round_wind: WS,
        dora_indicators: vec![Tile(TZ, 4)],
        ..Default::default()
    };
    let scores = bot.evaluate_discards(&h, &v);
    let p = |t: Tile| scores.iter().find(|(x, _)| *x == t).unwrap().1;
    assert_eq!(p(Tile(TZ, 2)) - p(Tile(TZ, 1)), 50);
}

#[test]
fn test_should_riichi() {
    let bot = Bot::default();
    let v = view();

    // 両面待ち
    let h = hand("123m456p789s23s55m1z");
    assert!(bot.should_riichi(&h, Tile(TZ, 1), &v));

    // 役ありの単騎待ちはダマ
    let h = hand("123m456p789s555z1z2z");
    assert!(!bot.should_riichi(&h, Tile(TZ, 2), &v));

    // 役なしの単騎待ち
    let h = hand("123m456p789s555m1z2z");
    assert!(bot.should_riichi(&h, Tile(TZ, 2), &v));

    // 親は常にリーチ
    let dealer = TableView { seat: 0, ..view() };
    let h = hand("123m456p789s555z1z2z");
    assert!(bot.should_riichi(&h, Tile(TZ, 2), &dealer));

    // 牌山が足りない, 聴牌していない, 副露あり
    let late = TableView { wall_count: 3, ..view() };
    let h = hand("123m456p789s23s55m1z");
    assert!(!bot.should_riichi(&h, Tile(TZ, 1), &late));
    assert!(!bot.should_riichi(&h, Tile(TM, 1), &v));
    let h = hand("456p789s23s55m1z<1m2m3m>");
    assert!(!bot.should_riichi(&h, Tile(TZ, 1), &v));
}

#[test]
fn test_view_validate() {
    assert!(view().validate().is_ok());

    let v = TableView {
        seat: 4,
        ..Default::default()
    };
    assert!(matches!(v.validate(), Err(Error::InvalidArgument(_))));

    let v = TableView {
        dealer: 7,
        ..Default::default()
    };
    assert!(v.validate().is_err());

    let v = TableView {
        round_wind: 0,
        ..Default::default()
    };
    assert!(v.validate().is_err());
}
