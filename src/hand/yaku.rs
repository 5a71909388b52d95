use std::fmt;

use super::shanten::{Block, BlockType, Decomposition, HandShape};
use crate::model::*;

use BlockType::*;

// 和了牌による待ちの形
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Wait {
    Ryanmen,
    Kanchan,
    Penchan,
    Tanki,
    Shanpon,
}

#[derive(Debug)]
pub struct YakuContext {
    hand: TileTable,       // 和了牌を含む門前の牌 九蓮宝燈の判定などに使用
    shape: HandShape,      // 和了形の種類
    blocks: Vec<Block>,    // 鳴きを含むすべての面子と雀頭(七対子は7つの対子)
    pair_tile: Option<Tile>, // 雀頭の牌
    winning_tile: Tile,    // 上がり牌
    wait: Wait,            // 待ちの形
    is_self_drawn: bool,   // ツモ和了
    is_open: bool,         // 鳴きの有無 (暗槓は含まない)
    prevalent_wind: Tnum,  // 場風 (東: 1, 南: 2, 西: 3, 北: 4)
    seat_wind: Tnum,       // 自風 (同上)
    yaku_flags: YakuFlags, // 組み合わせ以外による役 外部から設定を行う
    counts: Counts,        // 面子や牌種別のカウント
    iipeikou_count: usize, // 一盃口, 二盃口用
    yakuhai_check: TileRow, // 役牌面子のカウント(雀頭は含まない)
}

impl YakuContext {
    // completedは和了牌で完成した面子. ロンで完成した刻子は明刻として扱う
    pub fn new(
        hand: TileTable,
        decomposition: &Decomposition,
        winning_tile: Tile,
        wait: Wait,
        completed: Option<Block>,
        prevalent_wind: Tnum,
        seat_wind: Tnum,
        is_self_drawn: bool,
        is_open: bool,
        yaku_flags: YakuFlags,
    ) -> Self {
        let mut blocks = decomposition.melds.clone();
        if !is_self_drawn && wait == Wait::Shanpon {
            if let Some(c) = completed {
                if let Some(b) = blocks.iter_mut().find(|b| **b == c) {
                    b.0 = Pon;
                }
            }
        }
        match decomposition.shape {
            HandShape::Standard => {
                if let Some(h) = decomposition.head {
                    blocks.push(Block(Toitsu, h));
                }
            }
            HandShape::SevenPairs => blocks.extend(decomposition.partials.iter().copied()),
            HandShape::ThirteenOrphans => {}
        }

        let pair_tile = match decomposition.shape {
            HandShape::Standard => decomposition.head,
            _ => None,
        };
        let counts = count_type(&blocks);
        let iipeikou_count = count_iipeikou(&blocks);
        let yakuhai_check = check_yakuhai(&blocks);

        Self {
            hand,
            shape: decomposition.shape,
            blocks,
            pair_tile,
            winning_tile,
            wait,
            is_self_drawn,
            is_open,
            prevalent_wind,
            seat_wind,
            yaku_flags,
            counts,
            iipeikou_count,
            yakuhai_check,
        }
    }

    // (役一覧, 役満かどうか, 翻数または役満倍数)を返却
    pub fn calc_yaku(&self) -> (Vec<&'static Yaku>, bool, usize) {
        // 食い下がりで0翻になる役は除外
        let yaku: Vec<&'static Yaku> = YAKU_LIST
            .iter()
            .filter(|y| (y.func)(self) && (y.is_yakuman() || y.fan(self.is_open) > 0))
            .collect();

        let yakuman: Vec<&'static Yaku> = yaku.iter().copied().filter(|y| y.is_yakuman()).collect();
        if !yakuman.is_empty() {
            // 役満が含まれている場合、役満以上の役のみを返却
            let m = yakuman.iter().map(|y| y.fan_close - 12).sum();
            return (yakuman, true, m);
        }

        let m = yaku.iter().map(|y| y.fan(self.is_open)).sum();
        (yaku, false, m)
    }

    pub fn calc_fu(&self) -> usize {
        if is_chiitoitsu(self) {
            return 25;
        }
        if is_pinfu(self) {
            return if self.is_self_drawn { 20 } else { 30 };
        }

        // 副底
        let mut fu = 20;

        // 和了り方
        fu += if self.is_self_drawn {
            2 // ツモ
        } else if !self.is_open {
            10 // 門前ロン
        } else {
            0
        };

        // 面子, 雀頭
        for &Block(tp, t) in &self.blocks {
            let end = t.is_end();
            fu += match tp {
                Toitsu => {
                    let mut n = 0;
                    if t.is_dragon() {
                        n += 2;
                    }
                    if t.is_wind() && t.1 == self.prevalent_wind {
                        n += 2;
                    }
                    if t.is_wind() && t.1 == self.seat_wind {
                        n += 2;
                    }
                    n
                }
                Koutsu => if end { 8 } else { 4 },
                Pon => if end { 4 } else { 2 },
                Minkan => if end { 16 } else { 8 },
                Ankan => if end { 32 } else { 16 },
                _ => 0,
            };
        }

        // 待ちの形
        if matches!(self.wait, Wait::Tanki | Wait::Kanchan | Wait::Penchan) {
            fu += 2;
        }

        // 喰い平和形は30符
        if fu == 20 {
            fu = 30;
        }

        (fu + 9) / 10 * 10 // １の位は切り上げ
    }
}

#[derive(Debug, Default)]
struct Counts {
    shuntsu: usize,
    koutsu: usize,
    chi: usize,
    pon: usize,
    minkan: usize,
    ankan: usize,
    shuntsu_total: usize, // shuntsu + chi
    koutsu_total: usize,  // koutsu + pon + minkan + ankan
    ankou_total: usize,   // koutsu + ankan
    kantsu_total: usize,  // minkan + ankan
    tis: [usize; TYPE],   // tile Type Indices counts
}

// 特殊形&特殊条件の役
#[derive(Debug, Default, Clone, Copy)]
pub struct YakuFlags {
    pub menzentsumo: bool,
    pub riichi: bool,
    pub dabururiichi: bool,
    pub ippatsu: bool,
    pub haiteiraoyue: bool,
    pub houteiraoyui: bool,
    pub rinshankaihou: bool,
    pub chankan: bool,
    pub tenhou: bool,
    pub tiihou: bool,
}

fn count_type(blocks: &[Block]) -> Counts {
    let mut cnt = Counts::default();
    for &Block(tp, t) in blocks {
        match tp {
            Shuntsu => cnt.shuntsu += 1,
            Koutsu => cnt.koutsu += 1,
            Chi => cnt.chi += 1,
            Pon => cnt.pon += 1,
            Minkan => cnt.minkan += 1,
            Ankan => cnt.ankan += 1,
            _ => {}
        }
        cnt.tis[t.0] += 1;
    }
    cnt.shuntsu_total = cnt.shuntsu + cnt.chi;
    cnt.koutsu_total = cnt.koutsu + cnt.pon + cnt.minkan + cnt.ankan;
    cnt.ankou_total = cnt.koutsu + cnt.ankan;
    cnt.kantsu_total = cnt.minkan + cnt.ankan;

    cnt
}

fn count_iipeikou(blocks: &[Block]) -> usize {
    let mut n = 0;
    let mut shuntsu = TileTable::default();
    for &Block(tp, t) in blocks {
        if tp == Shuntsu {
            shuntsu[t.0][t.1] += 1;
            if shuntsu[t.0][t.1] % 2 == 0 {
                n += 1;
            }
        }
    }
    n
}

fn check_yakuhai(blocks: &[Block]) -> TileRow {
    let mut tr = TileRow::default();
    for b in blocks {
        if b.is_triplet() && b.1.is_honor() {
            tr[b.1 .1] += 1;
        }
    }
    tr
}

pub struct Yaku {
    pub name: &'static str,
    pub func: fn(&YakuContext) -> bool,
    pub fan_close: usize, // 鳴きなしの翻
    pub fan_open: usize,  // 鳴きありの翻(食い下がり)
}

impl Yaku {
    // 13翻以上は役満 (14は二倍役満)
    #[inline]
    pub fn is_yakuman(&self) -> bool {
        self.fan_close >= 13
    }

    #[inline]
    pub fn fan(&self, is_open: bool) -> usize {
        if is_open {
            self.fan_open
        } else {
            self.fan_close
        }
    }
}

impl fmt::Debug for Yaku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.name, self.fan_close, self.fan_open)
    }
}

macro_rules! yaku {
    ($n: expr, $f: expr, $c: expr, $o: expr) => {
        Yaku {
            name: $n,
            func: $f,
            fan_close: $c,
            fan_open: $o,
        }
    };
}

static YAKU_LIST: &[Yaku] = &[
    yaku!("場風", is_bakaze, 1, 1),
    yaku!("自風", is_jikaze, 1, 1),
    yaku!("白", is_haku, 1, 1),
    yaku!("發", is_hatsu, 1, 1),
    yaku!("中", is_chun, 1, 1),
    yaku!("断么九", is_tanyaochuu, 1, 1),
    yaku!("平和", is_pinfu, 1, 0),
    yaku!("一盃口", is_iipeikou, 1, 0),
    yaku!("二盃口", is_ryanpeikou, 3, 0),
    yaku!("一気通貫", is_ikkitsuukan, 2, 1),
    yaku!("三色同順", is_sanshokudoujun, 2, 1),
    yaku!("三色同刻", is_sanshokudoukou, 2, 2),
    yaku!("チャンタ", is_chanta, 2, 1),
    yaku!("純チャン", is_junchan, 3, 2),
    yaku!("混老頭", is_honroutou, 2, 2),
    yaku!("清老頭", is_chinroutou, 13, 13),
    yaku!("対々和", is_toitoihou, 2, 2),
    yaku!("三暗刻", is_sanankou, 2, 2),
    yaku!("四暗刻", is_suuankou, 13, 0),
    yaku!("四暗刻単騎", is_suuankoutanki, 14, 0),
    yaku!("三槓子", is_sankantsu, 2, 2),
    yaku!("四槓子", is_suukantsu, 13, 13),
    yaku!("混一色", is_honiisou, 3, 2),
    yaku!("清一色", is_chiniisou, 6, 5),
    yaku!("小三元", is_shousangen, 2, 2),
    yaku!("大三元", is_daisangen, 13, 13),
    yaku!("小四喜", is_shousuushii, 13, 13),
    yaku!("大四喜", is_daisuushii, 14, 14),
    yaku!("緑一色", is_ryuuiisou, 13, 13),
    yaku!("字一色", is_tuuiisou, 13, 13),
    yaku!("九蓮宝燈", is_chuurenpoutou, 13, 0),
    yaku!("純正九蓮宝燈", is_junseichuurenpoutou, 14, 0),
    // 特殊な組み合わせ
    yaku!("国士無双", is_kokushimusou, 13, 0),
    yaku!("国士無双十三面待ち", is_kokushimusoujuusanmenmachi, 14, 0),
    yaku!("七対子", is_chiitoitsu, 2, 0),
    // 特殊条件
    yaku!("門前清自摸和", is_menzentsumo, 1, 0),
    yaku!("立直", is_riichi, 1, 0),
    yaku!("両立直", is_dabururiichi, 2, 0),
    yaku!("一発", is_ippatsu, 1, 0),
    yaku!("海底摸月", is_haiteiraoyue, 1, 1),
    yaku!("河底撈魚", is_houteiraoyui, 1, 1),
    yaku!("嶺上開花", is_rinshankaihou, 1, 1),
    yaku!("槍槓", is_chankan, 1, 1),
    yaku!("天和", is_tenhou, 13, 13),
    yaku!("地和", is_tiihou, 13, 13),
];

// 役の優先順位 =================================================================
// * 役満が存在する場合は役満以外の役は削除
// * 以下の役は排他的(包含関係)であり右側を優先
//     一盃口, 二盃口
//     チャンタ, 純チャンタ
//     混老頭, 清老頭
//     混一色, 清一色
//     三暗刻, 四暗刻, 四暗刻単騎
//     三槓子, 四槓子
//     小四喜, 大四喜
//     九蓮宝燈, 純正九蓮宝燈
//     国士無双, 国士無双十三面待ち

// 場風
fn is_bakaze(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[ctx.prevalent_wind] == 1
}

// 自風
fn is_jikaze(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[ctx.seat_wind] == 1
}

// 白
fn is_haku(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[DW] == 1
}

// 發
fn is_hatsu(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[DG] == 1
}

// 中
fn is_chun(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[DR] == 1
}

// 断么九
fn is_tanyaochuu(ctx: &YakuContext) -> bool {
    if ctx.blocks.is_empty() {
        return false; // 国士対策
    }

    ctx.blocks.iter().all(|b| b.tiles().iter().all(|t| t.is_simple()))
}

// 平和
fn is_pinfu(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu != 4 || ctx.wait != Wait::Ryanmen {
        return false;
    }

    match ctx.pair_tile {
        Some(pt) if pt.is_honor() => {
            !(pt.is_dragon() || pt.1 == ctx.prevalent_wind || pt.1 == ctx.seat_wind)
        }
        Some(_) => true,
        None => false,
    }
}

// 一盃口
fn is_iipeikou(ctx: &YakuContext) -> bool {
    !ctx.is_open && ctx.iipeikou_count == 1
}

// 二盃口
fn is_ryanpeikou(ctx: &YakuContext) -> bool {
    !ctx.is_open && ctx.iipeikou_count == 2
}

// 一気通貫
fn is_ikkitsuukan(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu_total < 3 {
        return false;
    }

    (TM..TZ).any(|ti| [1, 4, 7].iter().all(|&n| has_sequence(ctx, Tile(ti, n))))
}

// 三色同順
fn is_sanshokudoujun(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu_total < 3 {
        return false;
    }

    (1..=7).any(|n| (TM..TZ).all(|ti| has_sequence(ctx, Tile(ti, n))))
}

// 三色同刻
fn is_sanshokudoukou(ctx: &YakuContext) -> bool {
    if ctx.counts.koutsu_total < 3 {
        return false;
    }

    (1..=9).any(|n| {
        (TM..TZ).all(|ti| ctx.blocks.iter().any(|b| b.is_triplet() && b.1 == Tile(ti, n)))
    })
}

// チャンタ
fn is_chanta(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu_total == 0 {
        return false;
    }

    let mut has_honor = false;
    for b in &ctx.blocks {
        let t = b.1;
        if b.is_sequence() {
            if t.1 != 1 && t.1 != 7 {
                return false;
            }
        } else if t.is_honor() {
            has_honor = true;
        } else if !t.is_terminal() {
            return false;
        }
    }

    has_honor
}

// 純チャン
fn is_junchan(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu_total == 0 {
        return false;
    }

    ctx.blocks.iter().all(|b| {
        if b.is_sequence() {
            b.1 .1 == 1 || b.1 .1 == 7
        } else {
            b.1.is_terminal()
        }
    })
}

// 混老頭
fn is_honroutou(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu_total != 0 {
        return false;
    }

    let mut has_honor = false;
    let mut has_terminal = false;
    for b in &ctx.blocks {
        if b.1.is_honor() {
            has_honor = true;
        } else if b.1.is_terminal() {
            has_terminal = true;
        } else {
            return false;
        }
    }

    has_honor && has_terminal
}

// 清老頭
fn is_chinroutou(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu_total != 0 || ctx.blocks.is_empty() {
        return false;
    }

    ctx.blocks.iter().all(|b| b.1.is_terminal())
}

// 対々和
fn is_toitoihou(ctx: &YakuContext) -> bool {
    ctx.counts.koutsu_total == 4
}

// 三暗刻
fn is_sanankou(ctx: &YakuContext) -> bool {
    ctx.counts.ankou_total == 3
}

// 四暗刻
fn is_suuankou(ctx: &YakuContext) -> bool {
    ctx.counts.ankou_total == 4 && ctx.wait != Wait::Tanki
}

// 四暗刻単騎
fn is_suuankoutanki(ctx: &YakuContext) -> bool {
    ctx.counts.ankou_total == 4 && ctx.wait == Wait::Tanki
}

// 三槓子
fn is_sankantsu(ctx: &YakuContext) -> bool {
    ctx.counts.kantsu_total == 3
}

// 四槓子
fn is_suukantsu(ctx: &YakuContext) -> bool {
    ctx.counts.kantsu_total == 4
}

// 混一色
fn is_honiisou(ctx: &YakuContext) -> bool {
    let tis = &ctx.counts.tis;
    suit_kinds(tis) == 1 && tis[TZ] > 0
}

// 清一色
fn is_chiniisou(ctx: &YakuContext) -> bool {
    let tis = &ctx.counts.tis;
    suit_kinds(tis) == 1 && tis[TZ] == 0
}

// 小三元
fn is_shousangen(ctx: &YakuContext) -> bool {
    let yc = &ctx.yakuhai_check;
    yc[DW] + yc[DG] + yc[DR] == 2 && ctx.pair_tile.map_or(false, |t| t.is_dragon())
}

// 大三元
fn is_daisangen(ctx: &YakuContext) -> bool {
    let yc = &ctx.yakuhai_check;
    yc[DW] + yc[DG] + yc[DR] == 3
}

// 小四喜
fn is_shousuushii(ctx: &YakuContext) -> bool {
    let yc = &ctx.yakuhai_check;
    yc[WE] + yc[WS] + yc[WW] + yc[WN] == 3 && ctx.pair_tile.map_or(false, |t| t.is_wind())
}

// 大四喜
fn is_daisuushii(ctx: &YakuContext) -> bool {
    let yc = &ctx.yakuhai_check;
    yc[WE] + yc[WS] + yc[WW] + yc[WN] == 4
}

// 緑一色
fn is_ryuuiisou(ctx: &YakuContext) -> bool {
    if ctx.blocks.is_empty() {
        return false;
    }

    ctx.blocks.iter().all(|b| {
        b.tiles().iter().all(|t| match t.0 {
            TS => matches!(t.1, 2 | 3 | 4 | 6 | 8),
            TZ => t.1 == DG,
            _ => false,
        })
    })
}

// 字一色
fn is_tuuiisou(ctx: &YakuContext) -> bool {
    !ctx.blocks.is_empty() && ctx.blocks.iter().all(|b| b.1.is_honor())
}

// 九蓮宝燈
fn is_chuurenpoutou(ctx: &YakuContext) -> bool {
    let wt = &ctx.winning_tile;
    let cnt = ctx.hand[wt.0][wt.1];
    is_chuurenpoutou2(ctx) && (cnt == 1 || cnt == 3)
}

// 純正九蓮宝燈
fn is_junseichuurenpoutou(ctx: &YakuContext) -> bool {
    let wt = &ctx.winning_tile;
    let cnt = ctx.hand[wt.0][wt.1];
    is_chuurenpoutou2(ctx) && (cnt == 2 || cnt == 4)
}

// 国士無双
fn is_kokushimusou(ctx: &YakuContext) -> bool {
    let wt = &ctx.winning_tile;
    ctx.shape == HandShape::ThirteenOrphans && ctx.hand[wt.0][wt.1] != 2
}

// 国士無双十三面待ち
fn is_kokushimusoujuusanmenmachi(ctx: &YakuContext) -> bool {
    let wt = &ctx.winning_tile;
    ctx.shape == HandShape::ThirteenOrphans && ctx.hand[wt.0][wt.1] == 2
}

// 七対子
fn is_chiitoitsu(ctx: &YakuContext) -> bool {
    ctx.shape == HandShape::SevenPairs
}

// 門前清自摸和
fn is_menzentsumo(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.menzentsumo
}

// 立直
fn is_riichi(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.riichi && !ctx.yaku_flags.dabururiichi
}

// 両立直
fn is_dabururiichi(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.dabururiichi
}

// 一発
fn is_ippatsu(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.ippatsu
}

// 海底摸月
fn is_haiteiraoyue(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.haiteiraoyue
}

// 河底撈魚
fn is_houteiraoyui(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.houteiraoyui
}

// 嶺上開花
fn is_rinshankaihou(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.rinshankaihou
}

// 槍槓
fn is_chankan(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.chankan
}

// 天和
fn is_tenhou(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.tenhou
}

// 地和
fn is_tiihou(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.tiihou
}

// 共通処理 ====================================================================

fn has_sequence(ctx: &YakuContext, t: Tile) -> bool {
    ctx.blocks.iter().any(|b| b.is_sequence() && b.1 == t)
}

// 含まれる数牌の種類数
fn suit_kinds(tis: &[usize; TYPE]) -> usize {
    (TM..TZ).filter(|&ti| tis[ti] > 0).count()
}

// 九蓮宝燈(純正を含む)
fn is_chuurenpoutou2(ctx: &YakuContext) -> bool {
    if ctx.is_open || ctx.shape != HandShape::Standard || ctx.counts.kantsu_total != 0 {
        return false;
    }

    let tis = &ctx.counts.tis;
    let ti = match (TM..TZ).find(|&ti| tis[ti] == 5) {
        Some(ti) => ti,
        None => return false,
    };

    let h = &ctx.hand;
    if h[ti][1] < 3 || h[ti][9] < 3 {
        return false;
    }
    (2..9).all(|ni| h[ti][ni] != 0)
}

// 和了牌が含まれる面子ごとの待ちの解釈 (待ちの形, 和了牌で完成した面子)
pub fn wait_patterns(d: &Decomposition, wt: Tile) -> Vec<(Wait, Option<Block>)> {
    if d.shape != HandShape::Standard {
        return vec![(Wait::Tanki, None)];
    }

    let mut res = vec![];
    if d.head == Some(wt) {
        res.push((Wait::Tanki, None));
    }
    for &b in d.melds.iter().filter(|b| !b.is_call()) {
        let Block(tp, t) = b;
        let wait = match tp {
            Koutsu if t == wt => Wait::Shanpon,
            Shuntsu if t.0 == wt.0 && t.1 <= wt.1 && wt.1 <= t.1 + 2 => {
                if wt.1 == t.1 + 1 {
                    Wait::Kanchan
                } else if (wt.1 == t.1 && t.1 == 7) || (wt.1 == t.1 + 2 && t.1 == 1) {
                    Wait::Penchan
                } else {
                    Wait::Ryanmen
                }
            }
            _ => continue,
        };
        if !res.contains(&(wait, Some(b))) {
            res.push((wait, Some(b)));
        }
    }
    res
}

#[cfg(test)]
fn complete(exp: &str) -> Decomposition {
    let h: Hand = exp.parse().unwrap();
    super::shanten::shanten(&h)
        .decompositions
        .into_iter()
        .find(|d| d.shape == HandShape::Standard)
        .unwrap()
}

#[test]
fn test_wait_patterns() {
    let d = complete("123m456p789s11z222z");
    assert_eq!(
        wait_patterns(&d, Tile(TM, 3)),
        vec![(Wait::Penchan, Some(Block(Shuntsu, Tile(TM, 1))))]
    );
    assert_eq!(
        wait_patterns(&d, Tile(TP, 4)),
        vec![(Wait::Ryanmen, Some(Block(Shuntsu, Tile(TP, 4))))]
    );
    assert_eq!(
        wait_patterns(&d, Tile(TS, 7)),
        vec![(Wait::Penchan, Some(Block(Shuntsu, Tile(TS, 7))))]
    );
    assert_eq!(
        wait_patterns(&d, Tile(TP, 5)),
        vec![(Wait::Kanchan, Some(Block(Shuntsu, Tile(TP, 4))))]
    );
    assert_eq!(wait_patterns(&d, Tile(TZ, 1)), vec![(Wait::Tanki, None)]);
    assert_eq!(
        wait_patterns(&d, Tile(TZ, 2)),
        vec![(Wait::Shanpon, Some(Block(Koutsu, Tile(TZ, 2))))]
    );
}

#[test]
fn test_ron_triplet_is_open() {
    let d = complete("111m456p789s11z222z");
    let c = Some(Block(Koutsu, Tile(TZ, 2)));
    let yf = YakuFlags::default();
    let ron = YakuContext::new(
        TileTable::default(),
        &d,
        Tile(TZ, 2),
        Wait::Shanpon,
        c,
        WE,
        WS,
        false,
        false,
        yf,
    );
    assert_eq!(ron.counts.ankou_total, 1);
    assert_eq!(ron.counts.pon, 1);
    let tsumo = YakuContext::new(
        TileTable::default(),
        &d,
        Tile(TZ, 2),
        Wait::Shanpon,
        c,
        WE,
        WS,
        true,
        false,
        yf,
    );
    assert_eq!(tsumo.counts.ankou_total, 2);
}
