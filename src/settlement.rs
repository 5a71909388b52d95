// 和了, 流局時の点数移動の計算
use serde::{Deserialize, Serialize};

use crate::model::*;

pub type Deltas = [Point; SEAT];

const HONBA_RON: Point = 300; // ロン和了の1本場あたり
const HONBA_TSUMO: Point = 100; // ツモ和了の1本場あたり(支払者ごと)
const KYOUTAKU: Point = 1000; // 供託のリーチ棒1本
const NOTEN_BAPPU: Point = 3000; // 不聴罰符の総額

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementContext {
    pub dealer: Seat,     // 親の座席
    pub honba: usize,     // 本場
    pub kyoutaku: usize,  // 供託(リーチ棒の本数)
}

impl SettlementContext {
    #[inline]
    fn honba_ron(&self) -> Point {
        HONBA_RON * self.honba as Point
    }

    #[inline]
    fn honba_tsumo(&self) -> Point {
        HONBA_TSUMO * self.honba as Point
    }

    #[inline]
    fn kyoutaku(&self) -> Point {
        KYOUTAKU * self.kyoutaku as Point
    }
}

// 包(責任払い)の対象となる役満
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pao {
    Daisangen,
    Daisuushii,
}

impl Pao {
    // 包の対象となる点数 (親の和了は1.5倍)
    pub fn points(self, is_dealer: bool) -> Point {
        let p = match self {
            Pao::Daisangen => 32000,
            Pao::Daisuushii => 64000,
        };
        if is_dealer {
            p * 3 / 2
        } else {
            p
        }
    }
}

// 100点単位で切り上げ
fn ceil100(n: Point, d: Point) -> Point {
    (n + d - 1) / d * 100
}

// ロン和了 pointsはロンの点数(本場, 供託を含まない)
pub fn ron(winner: Seat, loser: Seat, points: Point, ctx: &SettlementContext) -> Deltas {
    let mut d = [0; SEAT];
    let p = points + ctx.honba_ron();
    d[loser] -= p;
    d[winner] += p + ctx.kyoutaku();
    d
}

// ツモ和了 pointsはロン和了時の点数で, 各支払いはこれを分割して100点単位で切り上げ
pub fn tsumo(winner: Seat, points: Point, ctx: &SettlementContext) -> Deltas {
    let mut d = [0; SEAT];
    for s in 0..SEAT {
        if s == winner {
            continue;
        }
        let pay = if winner == ctx.dealer {
            ceil100(points, 300)
        } else if s == ctx.dealer {
            ceil100(points, 200)
        } else {
            ceil100(points, 400)
        } + ctx.honba_tsumo();
        d[s] -= pay;
        d[winner] += pay;
    }
    d[winner] += ctx.kyoutaku();
    d
}

// 包が成立したロン和了
// 放銃者と包の責任者が包の点数の半分ずつを負担し, 残りは放銃者が支払う
pub fn ron_with_pao(
    winner: Seat,
    loser: Seat,
    liable: Seat,
    points: Point,
    pao: Pao,
    ctx: &SettlementContext,
) -> Deltas {
    let half = pao.points(winner == ctx.dealer) / 2;
    let mut d = ron(winner, loser, points - half, ctx);
    let d2 = ron(winner, liable, half, &SettlementContext::default());
    for s in 0..SEAT {
        d[s] += d2[s];
    }
    d
}

// 包が成立したツモ和了
// 単一の役満は責任者の全額払い, 複合役満は包の点数のみ責任者が支払い残りをツモの分割で支払う
pub fn tsumo_with_pao(
    winner: Seat,
    liable: Seat,
    points: Point,
    yakuman_count: usize,
    pao: Pao,
    ctx: &SettlementContext,
) -> Deltas {
    if yakuman_count < 2 {
        return ron(winner, liable, points, ctx);
    }

    let p = pao.points(winner == ctx.dealer);
    let mut d = tsumo(winner, points - p, ctx);
    let d2 = ron(winner, liable, p, &SettlementContext::default());
    for s in 0..SEAT {
        d[s] += d2[s];
    }
    d
}

// 荒牌平局の不聴罰符 全員聴牌または全員不聴の場合は移動なし
pub fn draw(tenpai: [bool; SEAT]) -> Deltas {
    let n = tenpai.iter().filter(|&&b| b).count() as Point;
    let mut d = [0; SEAT];
    if n == 0 || n == SEAT as Point {
        return d;
    }

    for s in 0..SEAT {
        d[s] = if tenpai[s] {
            NOTEN_BAPPU / n
        } else {
            -NOTEN_BAPPU / (SEAT as Point - n)
        };
    }
    d
}

// 流し満貫の判定
// 河の牌がすべて么九牌で, かつ一度も鳴かれていない
pub fn is_nagashi_mangan(discards: &[Tile], called_turns: &[usize]) -> bool {
    !discards.is_empty() && called_turns.is_empty() && discards.iter().all(|t| t.is_end())
}

// 流し満貫はツモ和了の満貫として支払う
pub fn nagashi_mangan(seat: Seat, ctx: &SettlementContext) -> Deltas {
    let points = if seat == ctx.dealer { 12000 } else { 8000 };
    tsumo(seat, points, ctx)
}

#[cfg(test)]
fn ctx(dealer: Seat, honba: usize, kyoutaku: usize) -> SettlementContext {
    SettlementContext {
        dealer,
        honba,
        kyoutaku,
    }
}

#[test]
fn test_ron() {
    let d = ron(1, 2, 1000, &ctx(0, 0, 0));
    assert_eq!(d, [0, 1000, -1000, 0]);

    let d = ron(1, 2, 7700, &ctx(0, 2, 1));
    assert_eq!(d, [0, 8300 + 1000, -8300, 0]);
    assert_eq!(d.iter().sum::<Point>(), 1000);
}

#[test]
fn test_tsumo() {
    // 子 30符1翻 300/500
    let d = tsumo(1, 1000, &ctx(0, 0, 0));
    assert_eq!(d, [-500, 1100, -300, -300]);

    // 親 30符1翻 500オール
    let d = tsumo(0, 1500, &ctx(0, 0, 0));
    assert_eq!(d, [1500, -500, -500, -500]);

    // 子 20符2翻 400/700 1本場 供託1本
    let d = tsumo(2, 1300, &ctx(3, 1, 1));
    assert_eq!(d, [-500, -500, 1500 + 300 + 1000, -800]);
    assert_eq!(d.iter().sum::<Point>(), 1000);

    // 子 満貫 2000/4000
    let d = tsumo(3, 8000, &ctx(1, 0, 0));
    assert_eq!(d, [-2000, -4000, -2000, 8000]);
}

#[test]
fn test_pao() {
    // 子の大三元を放銃者以外が包
    let d = ron_with_pao(0, 1, 2, 32000, Pao::Daisangen, &ctx(3, 0, 0));
    assert_eq!(d, [32000, -16000, -16000, 0]);

    // 放銃者と責任者が同じ
    let d = ron_with_pao(0, 1, 1, 32000, Pao::Daisangen, &ctx(3, 1, 0));
    assert_eq!(d, [32300, -32300, 0, 0]);

    // 単一役満のツモは責任者の全額払い
    let d = tsumo_with_pao(0, 2, 48000, 1, Pao::Daisangen, &ctx(0, 0, 1));
    assert_eq!(d, [49000, 0, -48000, 0]);

    // 複合役満(大三元 + 字一色)のツモ
    let d = tsumo_with_pao(1, 3, 64000, 2, Pao::Daisangen, &ctx(0, 0, 0));
    assert_eq!(d, [-16000, 64000, -8000, -40000]);
    assert_eq!(d.iter().sum::<Point>(), 0);
}

#[test]
fn test_draw() {
    assert_eq!(draw([true, false, true, false]), [1500, -1500, 1500, -1500]);
    assert_eq!(draw([true, false, false, false]), [3000, -1000, -1000, -1000]);
    assert_eq!(draw([true, true, true, false]), [1000, 1000, 1000, -3000]);
    assert_eq!(draw([false; SEAT]), [0; SEAT]);
    assert_eq!(draw([true; SEAT]), [0; SEAT]);
}

#[test]
fn test_nagashi_mangan() {
    let kawa = tiles_from_string("1m9p1z7z9s").unwrap();
    assert!(is_nagashi_mangan(&kawa, &[]));
    assert!(!is_nagashi_mangan(&kawa, &[3]));
    let kawa = tiles_from_string("1m9p2s").unwrap();
    assert!(!is_nagashi_mangan(&kawa, &[]));

    let d = nagashi_mangan(0, &ctx(0, 0, 0));
    assert_eq!(d, [12000, -4000, -4000, -4000]);
    let d = nagashi_mangan(2, &ctx(0, 0, 0));
    assert_eq!(d, [-4000, -2000, 8000, -2000]);
}
