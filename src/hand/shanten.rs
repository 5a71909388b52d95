use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use log::trace;
use serde::Serialize;

use crate::model::*;
use crate::util::misc::cartesian_product;

// 七対子, 国士無双が不可能な場合(副露あり)のシャンテン数
pub const SHANTEN_IMPOSSIBLE: i32 = 99;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum HandShape {
    Standard,
    SevenPairs,
    ThirteenOrphans,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum BlockType {
    // 面子
    Shuntsu,
    Koutsu,
    Chi,
    Pon,
    Minkan,
    Ankan,
    // 塔子・対子
    Toitsu,
    Ryanmen,
    Penchan,
    Kanchan,
}

use BlockType::*;

// 面子または塔子. 牌は先頭(最小)の牌
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Block(pub BlockType, pub Tile);

impl Block {
    pub fn from_meld(m: &Meld) -> Self {
        let tp = match m.type_ {
            MeldType::Chi => Chi,
            MeldType::Pon => Pon,
            MeldType::Minkan => Minkan,
            MeldType::Ankan => Ankan,
        };
        Self(tp, m.tile())
    }

    // 隣接(d=1), 嵌張(d=2), 対子(d=0)の塔子を生成
    fn partial(t: Tile, d: usize) -> Self {
        match d {
            0 => Self(Toitsu, t),
            2 => Self(Kanchan, t),
            _ if t.1 == 1 || t.1 == 8 => Self(Penchan, t),
            _ => Self(Ryanmen, t),
        }
    }

    pub fn tiles(&self) -> Vec<Tile> {
        let Block(tp, t) = *self;
        let next = |d: usize| Tile(t.0, t.1 + d);
        match tp {
            Shuntsu | Chi => vec![t, next(1), next(2)],
            Koutsu | Pon => vec![t; 3],
            Minkan | Ankan => vec![t; 4],
            Toitsu => vec![t; 2],
            Ryanmen | Penchan => vec![t, next(1)],
            Kanchan => vec![t, next(2)],
        }
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        matches!(self.0, Shuntsu | Koutsu | Chi | Pon | Minkan | Ankan)
    }

    // 鳴き or 暗槓
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self.0, Chi | Pon | Minkan | Ankan)
    }

    #[inline]
    pub fn is_sequence(&self) -> bool {
        matches!(self.0, Shuntsu | Chi)
    }

    #[inline]
    pub fn is_triplet(&self) -> bool {
        matches!(self.0, Koutsu | Pon | Minkan | Ankan)
    }

    // 塔子の受け入れ牌
    pub fn waits(&self) -> Vec<Tile> {
        let Block(tp, t) = *self;
        match tp {
            Toitsu => vec![t],
            Ryanmen => vec![Tile(t.0, t.1 - 1), Tile(t.0, t.1 + 2)],
            Penchan if t.1 == 1 => vec![Tile(t.0, 3)],
            Penchan => vec![Tile(t.0, 7)],
            Kanchan => vec![Tile(t.0, t.1 + 1)],
            _ => vec![],
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = tiles_to_string(&self.tiles());
        match self.0 {
            Chi | Pon | Minkan => write!(f, "<{}>", s),
            Ankan => write!(f, "({})", s),
            _ => write!(f, "{}", s),
        }
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

// 手牌の分解 (雀頭, 面子, 塔子, 孤立牌)
// 七対子では対子をpartialsに, 国士無双では么九牌の対子をheadに格納する
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Decomposition {
    pub shape: HandShape,
    pub head: Option<Tile>,
    pub melds: Vec<Block>,
    pub partials: Vec<Block>,
    pub isolated: Vec<Tile>,
}

impl Decomposition {
    fn new(shape: HandShape, head: Option<Tile>) -> Self {
        Self {
            shape,
            head,
            melds: vec![],
            partials: vec![],
            isolated: vec![],
        }
    }

    fn canonicalize(&mut self) {
        self.melds.sort();
        self.partials.sort();
        self.isolated.sort();
    }

    // 分解の内容から計算したシャンテン数
    pub fn shanten(&self) -> i32 {
        match self.shape {
            HandShape::Standard => calc_shanten(
                self.melds.len(),
                self.partials.len(),
                self.isolated.len(),
                self.head.is_some(),
            ),
            HandShape::SevenPairs => {
                let pairs: Vec<Tile> = self.partials.iter().map(|b| b.1).collect();
                let mut singles: Vec<Tile> = self
                    .isolated
                    .iter()
                    .filter(|t| !pairs.contains(t))
                    .copied()
                    .collect();
                singles.dedup();
                calc_shanten_seven_pairs(pairs.len(), singles.len())
            }
            HandShape::ThirteenOrphans => {
                let mut kinds: Vec<Tile> = self
                    .head
                    .iter()
                    .chain(self.isolated.iter())
                    .filter(|t| t.is_end())
                    .copied()
                    .collect();
                kinds.sort();
                kinds.dedup();
                13 - kinds.len() as i32 - self.head.is_some() as i32
            }
        }
    }

    // 和了形の分解
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.shanten() == -1
    }
}

impl fmt::Display for Decomposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut v = vec![];
        if let Some(h) = self.head {
            v.push(tiles_to_string(&[h, h]));
        }
        v.extend(self.melds.iter().map(|b| b.to_string()));
        v.extend(self.partials.iter().map(|b| b.to_string()));
        v.extend(self.isolated.iter().map(|t| t.to_string()));
        let tag = match self.shape {
            HandShape::Standard => "",
            HandShape::SevenPairs => " [七対子]",
            HandShape::ThirteenOrphans => " [国士無双]",
        };
        write!(f, "{}{}", v.join(","), tag)
    }
}

#[derive(Debug, Clone)]
pub struct ShantenResult {
    pub shanten: i32,
    pub decompositions: Vec<Decomposition>,
}

// 面子数, 塔子数, 孤立牌数, 雀頭の有無からシャンテン数を計算
pub fn calc_shanten(melds: usize, partials: usize, isolated: usize, has_head: bool) -> i32 {
    let (mut m, mut t, mut k) = (melds as i32, partials as i32, isolated as i32);
    // 雀頭がない場合は5ブロック必要
    let max_block = if has_head { 4 } else { 5 };
    // 面子過多
    if m > 4 {
        t += m - 4;
        m = 4;
    }
    // 塔子過多
    if m + t > 4 {
        k += m + t - 4;
        t = 4 - m;
    }
    // 孤立牌過多
    if m + t + k > max_block {
        k = max_block - m - t;
    }
    // 雀頭は塔子として数える
    if has_head {
        t += 1;
    }
    13 - 3 * m - 2 * t - k
}

fn calc_shanten_seven_pairs(pairs: usize, singles: usize) -> i32 {
    let p = pairs.min(7);
    let s = singles.min(7 - p);
    13 - 2 * p as i32 - s as i32
}

// 数牌1種類の分解のキャッシュ
// 1枚ずつ異なる手牌を続けて計算する場合(待ち判定など)に共有する
#[derive(Debug, Default)]
pub struct PatternCache {
    suits: HashMap<(TileRow, Type), Vec<Pattern>>,
}

impl PatternCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn suit_patterns(&mut self, row: &TileRow, ti: Type) -> &[Pattern] {
        self.suits
            .entry((*row, ti))
            .or_insert_with(|| suit_patterns(row, ti))
    }
}

// 最小シャンテン数と, それを達成するすべての分解を返却
pub fn shanten(hand: &Hand) -> ShantenResult {
    shanten_with_cache(hand, &mut PatternCache::new())
}

pub fn shanten_with_cache(hand: &Hand, cache: &mut PatternCache) -> ShantenResult {
    let mut cands = standard_decompositions(hand, cache);
    cands.extend(seven_pairs_decomposition(hand));
    cands.extend(thirteen_orphans_decompositions(hand));

    let shanten = cands
        .iter()
        .map(|(s, _)| *s)
        .min()
        .unwrap_or(SHANTEN_IMPOSSIBLE);
    let decompositions: BTreeSet<Decomposition> = cands
        .into_iter()
        .filter(|(s, _)| *s == shanten)
        .map(|(_, d)| d)
        .collect();
    trace!(
        "shanten {}: {} ({} decompositions)",
        hand,
        shanten,
        decompositions.len()
    );

    ShantenResult {
        shanten,
        decompositions: decompositions.into_iter().collect(),
    }
}

#[inline]
pub fn shanten_number(hand: &Hand) -> i32 {
    shanten(hand).shanten
}

// [通常形]

#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
struct Pattern {
    melds: Vec<Block>,
    partials: Vec<Block>,
    isolated: Vec<Tile>,
}

// 孤立牌(前後2以内に牌がなく重なってもいない数牌, 重なっていない字牌)を分離
pub fn split_isolated(tt: &TileTable) -> (TileTable, Vec<Tile>) {
    let mut rest = *tt;
    let mut isolated = vec![];
    for t in Tile::all() {
        let c = tt[t.0][t.1];
        if c != 1 {
            continue;
        }
        let has_neighbor = t.is_suit()
            && (t.1.saturating_sub(2)..=(t.1 + 2).min(9))
                .any(|n| n != t.1 && n >= 1 && tt[t.0][n] > 0);
        if !has_neighbor {
            rest[t.0][t.1] = 0;
            isolated.push(t);
        }
    }
    (rest, isolated)
}

fn standard_decompositions(hand: &Hand, cache: &mut PatternCache) -> Vec<(i32, Decomposition)> {
    let (tt, isolated) = split_isolated(hand.concealed());
    let fixed: Vec<Block> = hand.calls().map(Block::from_meld).collect();

    let mut heads = vec![None];
    heads.extend(Tile::all().filter(|t| tt[t.0][t.1] >= 2).map(Some));

    // 雀頭を抜かない牌種の分解は使い回す
    let base = vec![
        cache.suit_patterns(&tt[TM], TM).to_vec(),
        cache.suit_patterns(&tt[TP], TP).to_vec(),
        cache.suit_patterns(&tt[TS], TS).to_vec(),
        vec![honor_pattern(&tt[TZ])],
    ];

    let mut best = SHANTEN_IMPOSSIBLE;
    let mut res = vec![];
    for head in heads {
        let mut patterns = base.clone();
        if let Some(h) = head {
            let mut row = tt[h.0];
            row[h.1] -= 2;
            patterns[h.0] = if h.is_honor() {
                vec![honor_pattern(&row)]
            } else {
                cache.suit_patterns(&row, h.0).to_vec()
            };
        }
        for combo in cartesian_product(&patterns) {
            let mut d = Decomposition::new(HandShape::Standard, head);
            d.melds.extend(fixed.iter().copied());
            d.isolated.extend(isolated.iter().copied());
            for p in combo {
                d.melds.extend(p.melds.iter().copied());
                d.partials.extend(p.partials.iter().copied());
                d.isolated.extend(p.isolated.iter().copied());
            }
            d.canonicalize();

            let s = d.shanten();
            if s < best {
                best = s;
                res.clear();
            }
            if s == best {
                res.push((s, d));
            }
        }
    }

    res
}

// 数牌1種類の面子・塔子の取り方のうち, (面子数, 塔子数)がパレート最適なものをすべて返却
fn suit_patterns(row: &TileRow, ti: Type) -> Vec<Pattern> {
    let mut meld_splits = vec![];
    extract_melds(*row, ti, 1, vec![], &mut meld_splits);

    // (面子数, 塔子数)ごとに分類
    let mut buckets: BTreeMap<(usize, usize), BTreeSet<Pattern>> = BTreeMap::new();
    for (melds, rest) in meld_splits {
        let mut partial_splits = vec![];
        extract_partials(rest, ti, 1, Pattern::default(), &mut partial_splits);
        for mut p in partial_splits {
            p.melds = melds.clone();
            p.melds.sort();
            p.partials.sort();
            p.isolated.sort();
            buckets
                .entry((p.melds.len(), p.partials.len()))
                .or_default()
                .insert(p);
        }
    }

    let keys: Vec<(usize, usize)> = buckets.keys().copied().collect();
    let dominated = |(m, t): (usize, usize)| {
        keys.iter()
            .any(|&(qm, qt)| qm >= m && qt >= t && (qm, qt) != (m, t))
    };
    let res: Vec<Pattern> = buckets
        .into_iter()
        .filter(|&(k, _)| !dominated(k))
        .flat_map(|(_, ps)| ps)
        .collect();
    trace!("suit {}: {} patterns", ti, res.len());
    res
}

// 位置nから順子・刻子の抜き取り方を重複なく列挙
fn extract_melds(
    row: TileRow,
    ti: Type,
    n: Tnum,
    acc: Vec<Block>,
    out: &mut Vec<(Vec<Block>, TileRow)>,
) {
    if n > 9 {
        out.push((acc, row));
        return;
    }

    for k in 0..=row[n] / 3 {
        let mut row = row;
        row[n] -= 3 * k;
        let mut acc = acc.clone();
        acc.extend(std::iter::repeat(Block(Koutsu, Tile(ti, n))).take(k));

        let max_run = if n <= 7 {
            row[n].min(row[n + 1]).min(row[n + 2])
        } else {
            0
        };
        for r in 0..=max_run {
            let mut row = row;
            if r > 0 {
                row[n] -= r;
                row[n + 1] -= r;
                row[n + 2] -= r;
            }
            let mut acc = acc.clone();
            acc.extend(std::iter::repeat(Block(Shuntsu, Tile(ti, n))).take(r));
            extract_melds(row, ti, n + 1, acc, out);
        }
    }
}

// 位置nから対子・塔子の抜き取り方を重複なく列挙. 残りは孤立牌
// 孤立牌同士で塔子・対子が作れる取り方は塔子を増やした取り方に劣るので列挙しない
fn extract_partials(row: TileRow, ti: Type, n: Tnum, acc: Pattern, out: &mut Vec<Pattern>) {
    if n > 9 {
        out.push(acc);
        return;
    }

    // 2つ前までに孤立牌がある
    let near_isolated = acc.isolated.iter().any(|t| t.1 + 2 >= n);

    let c = row[n];
    for p in 0..=c / 2 {
        let c1 = c - 2 * p;
        let max_adj = if n <= 8 { c1.min(row[n + 1]) } else { 0 };
        for a in 0..=max_adj {
            let c2 = c1 - a;
            let max_gap = if n <= 7 { c2.min(row[n + 2]) } else { 0 };
            for g in 0..=max_gap {
                let iso = c2 - g;
                if iso >= 2 || (iso == 1 && near_isolated) {
                    continue;
                }

                let mut row = row;
                row[n] = 0;
                if a > 0 {
                    row[n + 1] -= a;
                }
                if g > 0 {
                    row[n + 2] -= g;
                }
                let t = Tile(ti, n);
                let mut acc = acc.clone();
                acc.partials.extend(std::iter::repeat(Block::partial(t, 0)).take(p));
                acc.partials.extend(std::iter::repeat(Block::partial(t, 1)).take(a));
                acc.partials.extend(std::iter::repeat(Block::partial(t, 2)).take(g));
                acc.isolated.extend(std::iter::repeat(t).take(iso));
                extract_partials(row, ti, n + 1, acc, out);
            }
        }
    }
}

// 字牌は刻子か対子のみ
fn honor_pattern(row: &TileRow) -> Pattern {
    let mut p = Pattern::default();
    for ni in WE..=DR {
        let t = Tile(TZ, ni);
        let mut c = row[ni];
        if c >= 3 {
            p.melds.push(Block(Koutsu, t));
            c -= 3;
        }
        if c >= 2 {
            p.partials.push(Block(Toitsu, t));
            c -= 2;
        }
        p.isolated.extend(std::iter::repeat(t).take(c));
    }
    p
}

// [七対子]

fn seven_pairs_decomposition(hand: &Hand) -> Option<(i32, Decomposition)> {
    if hand.has_calls() {
        return None;
    }

    let tt = hand.concealed();
    let mut d = Decomposition::new(HandShape::SevenPairs, None);
    for t in Tile::all() {
        let c = tt[t.0][t.1];
        if c >= 2 {
            d.partials.push(Block(Toitsu, t));
            d.isolated.extend(std::iter::repeat(t).take(c - 2));
        } else if c == 1 {
            d.isolated.push(t);
        }
    }
    d.canonicalize();
    Some((d.shanten(), d))
}

// [国士無双]

fn thirteen_orphans_decompositions(hand: &Hand) -> Vec<(i32, Decomposition)> {
    if hand.has_calls() {
        return vec![];
    }

    let tiles = hand.tiles();
    let pairs: Vec<Tile> = Tile::all()
        .filter(|t| t.is_end() && hand.count(*t) >= 2)
        .collect();
    let heads: Vec<Option<Tile>> = if pairs.is_empty() {
        vec![None]
    } else {
        pairs.into_iter().map(Some).collect()
    };

    heads
        .into_iter()
        .map(|head| {
            let mut d = Decomposition::new(HandShape::ThirteenOrphans, head);
            d.isolated = tiles.clone();
            if let Some(h) = head {
                for _ in 0..2 {
                    if let Some(pos) = d.isolated.iter().position(|&x| x == h) {
                        d.isolated.remove(pos);
                    }
                }
            }
            d.canonicalize();
            (d.shanten(), d)
        })
        .collect()
}

#[cfg(test)]
fn hand(exp: &str) -> Hand {
    exp.parse().unwrap()
}

#[test]
fn test_calc_shanten() {
    assert_eq!(calc_shanten(4, 0, 0, true), -1);
    assert_eq!(calc_shanten(4, 0, 1, false), 0);
    assert_eq!(calc_shanten(3, 1, 2, true), 0);
    assert_eq!(calc_shanten(0, 6, 1, true), 3);
    assert_eq!(calc_shanten(5, 0, 0, false), 0);
}

#[test]
fn test_shanten_standard() {
    let cases = [
        ("123m456p789s11z22z", 0),
        ("123m456p789s11z222z", -1),
        ("123m456p789s1z2z3z4z", 2),
        ("123m456p789s1z1z3z4z", 1),
        ("19m19p19s1234567z", 0),
        ("11223344556677m", -1),
        ("1122334455667z", 0),
        ("1m<2z2z2z><5p6p7p><9s9s9s9s>(1p1p1p1p)", 0),
    ];
    for (exp, s) in cases {
        assert_eq!(shanten_number(&hand(exp)), s, "{}", exp);
    }
}

#[test]
fn test_decompositions_reproduce_shanten() {
    for exp in [
        "123m456p789s11z22z",
        "1234m5678p99s1234z",
        "11223344556677m",
        "19m19p19s1234567z",
        "2345m",
    ] {
        let r = shanten(&hand(exp));
        assert!(!r.decompositions.is_empty());
        for d in &r.decompositions {
            assert_eq!(d.shanten(), r.shanten, "{} {}", exp, d);
        }
    }
}

#[test]
fn test_ties_across_shapes() {
    // 二盃口形は七対子としても和了形
    let r = shanten(&hand("11223344556677m"));
    assert_eq!(r.shanten, -1);
    let shapes: BTreeSet<HandShape> = r.decompositions.iter().map(|d| d.shape).collect();
    assert!(shapes.contains(&HandShape::Standard));
    assert!(shapes.contains(&HandShape::SevenPairs));
}

#[test]
fn test_isolated_tiles_are_kept() {
    let r = shanten(&hand("123m456p789s5z9m1p"));
    for d in r.decompositions.iter().filter(|d| d.shape == HandShape::Standard) {
        assert!(d.isolated.contains(&Tile(TZ, 5)), "{}", d);
    }
}

#[test]
fn test_called_melds_fixed() {
    let r = shanten(&hand("1m<2z2z2z><5p6p7p><9s9s9s9s>(1p1p1p1p)"));
    assert_eq!(r.shanten, 0);
    assert_eq!(r.decompositions.len(), 1);
    let d = &r.decompositions[0];
    assert_eq!(d.melds.len(), 4);
    assert!(d.partials.is_empty());
    assert_eq!(d.isolated, vec![Tile(TM, 1)]);
}

#[test]
fn test_block_waits() {
    assert_eq!(Block::partial(Tile(TM, 1), 1).0, Penchan);
    assert_eq!(Block::partial(Tile(TM, 8), 1).waits(), vec![Tile(TM, 7)]);
    assert_eq!(
        Block::partial(Tile(TP, 4), 1).waits(),
        vec![Tile(TP, 3), Tile(TP, 6)]
    );
    assert_eq!(Block::partial(Tile(TS, 3), 2).waits(), vec![Tile(TS, 4)]);
}

#[test]
fn test_one_suit_hand() {
    use std::time::{Duration, Instant};

    // 面子・塔子の取り方が非常に多い手牌
    let h = hand("22334455667789p");
    let start = Instant::now();
    let r = shanten(&h);
    assert!(start.elapsed() < Duration::from_millis(500), "{:?}", start.elapsed());
    assert_eq!(r.shanten, 0);
    for d in &r.decompositions {
        assert_eq!(d.shanten(), 0, "{}", d);
    }

    let h = hand("11122233344455m");
    let start = Instant::now();
    assert_eq!(shanten_number(&h), -1);
    assert!(start.elapsed() < Duration::from_millis(500), "{:?}", start.elapsed());
}

#[test]
fn test_suit_patterns_are_maximal() {
    // 孤立牌同士で塔子・対子が作れる分解は含まれない
    let row = hand("22334455667789p").concealed()[TP];
    for p in suit_patterns(&row, TP) {
        for (i, a) in p.isolated.iter().enumerate() {
            for b in &p.isolated[i + 1..] {
                assert!(b.1 > a.1 + 2, "{:?}", p.isolated);
            }
        }
    }
}

#[test]
fn test_pattern_cache() {
    let mut cache = PatternCache::new();
    let base = hand("1234567m2468p13s");
    for t in Tile::all() {
        let h = base.with(t);
        let r1 = shanten_with_cache(&h, &mut cache);
        let r2 = shanten(&h);
        assert_eq!(r1.shanten, r2.shanten, "{}", t);
        assert_eq!(r1.decompositions, r2.decompositions, "{}", t);
    }
}
