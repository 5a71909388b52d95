// 手牌解析の不変条件のプロパティテスト

use proptest::prelude::*;
use proptest::sample::subsequence;

use mahjong_engine::hand::*;
use mahjong_engine::model::*;

const DORA_NAMES: [&str; 3] = ["ドラ", "赤ドラ", "裏ドラ"];

// 136枚の山からn枚を選ぶ
fn tiles_strategy(n: usize) -> impl Strategy<Value = Vec<Tile>> {
    subsequence((0..KIND * TILE).collect::<Vec<usize>>(), n)
        .prop_map(|v| v.into_iter().map(|i| Tile::from_index(i / TILE)).collect())
}

fn hand_strategy(n: usize) -> impl Strategy<Value = Hand> {
    tiles_strategy(n).prop_map(|v| Hand::new(&v))
}

// 面子: (順子かどうか, 牌種Index)
fn meld_tiles(is_seq: bool, i: usize) -> Vec<Tile> {
    let t = Tile::from_index(i);
    if is_seq {
        // 数牌の1~7から始まる順子に写像
        let tp = i % 3;
        let n = i % 7 + 1;
        vec![Tile(tp, n), Tile(tp, n + 1), Tile(tp, n + 2)]
    } else {
        vec![t, t, t]
    }
}

// 4面子1雀頭の14枚. 同種5枚以上となる場合はNone
fn standard_win(melds: &[(bool, usize)], head: usize) -> Option<Vec<Tile>> {
    let mut tiles = vec![];
    for &(is_seq, i) in melds {
        tiles.extend(meld_tiles(is_seq, i));
    }
    let h = Tile::from_index(head);
    tiles.push(h);
    tiles.push(h);

    let tt = tiles_to_tile_table(&tiles);
    if Tile::all().any(|t| tt[t.0][t.1] > TILE) {
        return None;
    }
    Some(tiles)
}

// 副露: (種類, 牌種Index) 種類 0: チー, 1: ポン, 2: 明槓, 3: 暗槓
fn call_string(kind: usize, i: usize) -> String {
    let t = Tile::from_index(i);
    let tiles = match kind {
        0 => meld_tiles(true, i),
        1 => vec![t; 3],
        _ => vec![t; 4],
    };
    let s = tiles_to_string(&tiles);
    if kind == 3 {
        format!("({})", s)
    } else {
        format!("<{}>", s)
    }
}

// 総当たりによるシャンテン数 (門前のみ)
fn reference_shanten(tiles: &[Tile]) -> i32 {
    let mut c = [0usize; KIND];
    for t in tiles {
        c[t.to_index()] += 1;
    }

    // 通常形
    let mut best = blocks(&mut c, 0, 0, 0);
    for i in 0..KIND {
        if c[i] >= 2 {
            c[i] -= 2;
            best = best.max(blocks(&mut c, 0, 0, 0) + 1);
            c[i] += 2;
        }
    }
    let standard = 8 - best;

    // 七対子
    let kinds = c.iter().filter(|&&n| n > 0).count() as i32;
    let pairs = c.iter().filter(|&&n| n >= 2).count() as i32;
    let seven_pairs = 6 - pairs + (7 - kinds).max(0);

    // 国士無双
    let yaochu: Vec<usize> = yaochu().iter().map(|t| t.to_index()).collect();
    let yk = yaochu.iter().filter(|&&i| c[i] > 0).count() as i32;
    let yp = yaochu.iter().any(|&i| c[i] >= 2) as i32;
    let orphans = 13 - yk - yp;

    standard.min(seven_pairs).min(orphans)
}

// 2 * 面子数 + 有効な塔子数 の最大値
fn blocks(c: &mut [usize; KIND], mut i: usize, m: usize, t: usize) -> i32 {
    while i < KIND && c[i] == 0 {
        i += 1;
    }
    if i == KIND {
        return (2 * m + t.min(4 - m)) as i32;
    }

    let is_suit = i < 27;
    let r = i % 9;
    let mut best = 0;
    let mut take = |c: &mut [usize; KIND], ds: &[usize], m: usize, t: usize| {
        for &d in ds {
            c[i + d] -= 1;
        }
        best = best.max(blocks(c, i, m, t));
        for &d in ds {
            c[i + d] += 1;
        }
    };

    take(c, &[0], m, t);
    if c[i] >= 3 && m < 4 {
        take(c, &[0, 0, 0], m + 1, t);
    }
    if c[i] >= 2 {
        take(c, &[0, 0], m, t + 1);
    }
    if is_suit && r <= 6 && c[i + 1] > 0 && c[i + 2] > 0 && m < 4 {
        take(c, &[0, 1, 2], m + 1, t);
    }
    if is_suit && r <= 7 && c[i + 1] > 0 {
        take(c, &[0, 1], m, t + 1);
    }
    if is_suit && r <= 6 && c[i + 2] > 0 {
        take(c, &[0, 2], m, t + 1);
    }
    best
}

fn yaochu() -> Vec<Tile> {
    tiles_from_string("19m19p19s1234567z").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // 牌を1枚加えてもシャンテン数は増えない
    #[test]
    fn shanten_monotonic(h in hand_strategy(13), i in 0..KIND) {
        let t = Tile::from_index(i);
        prop_assume!(h.count(t) < TILE);
        prop_assert!(shanten_number(&h.with(t)) <= shanten_number(&h));
    }

    // 4面子1雀頭として組み立てた手牌は和了形
    #[test]
    fn standard_win_is_complete(
        melds in prop::collection::vec((any::<bool>(), 0..KIND), 4),
        head in 0..KIND,
    ) {
        let tiles = standard_win(&melds, head);
        prop_assume!(tiles.is_some());
        let h = Hand::new(&tiles.unwrap());
        let res = shanten(&h);
        prop_assert_eq!(res.shanten, -1);
        prop_assert!(res.decompositions.iter().all(|d| d.is_complete()));
        prop_assert!(is_win(&h));
    }

    // 異なる7種の対子は和了形
    #[test]
    fn seven_pairs_is_complete(kinds in subsequence((0..KIND).collect::<Vec<usize>>(), 7)) {
        let mut tiles = vec![];
        for i in kinds {
            tiles.push(Tile::from_index(i));
            tiles.push(Tile::from_index(i));
        }
        let res = shanten(&Hand::new(&tiles));
        prop_assert_eq!(res.shanten, -1);
        prop_assert!(res.decompositions.iter().any(|d| d.shape == HandShape::SevenPairs));
    }

    // 么九牌13種 + 1枚は和了形
    #[test]
    fn thirteen_orphans_is_complete(dup in 0..13usize) {
        let mut tiles = yaochu();
        tiles.push(tiles[dup]);
        let res = shanten(&Hand::new(&tiles));
        prop_assert_eq!(res.shanten, -1);
        prop_assert!(res.decompositions.iter().any(|d| d.shape == HandShape::ThirteenOrphans));
    }

    // すべての分解がシャンテン数の式で最小シャンテン数を再現する
    #[test]
    fn decompositions_match_shanten(h in hand_strategy(13)) {
        let res = shanten(&h);
        prop_assert!(!res.decompositions.is_empty());
        for d in &res.decompositions {
            prop_assert_eq!(d.shanten(), res.shanten, "{}", d);
            if d.shape == HandShape::Standard {
                let s = calc_shanten(d.melds.len(), d.partials.len(), d.isolated.len(), d.head.is_some());
                prop_assert_eq!(s, res.shanten, "{}", d);
            }
        }
    }

    // 和了形から1枚抜いた聴牌形の待ちにはその牌が含まれ, どの待ち牌でも和了形になる
    #[test]
    fn machi_is_sound(
        melds in prop::collection::vec((any::<bool>(), 0..KIND), 4),
        head in 0..KIND,
        win_index in 0..14usize,
    ) {
        let tiles = standard_win(&melds, head);
        prop_assume!(tiles.is_some());
        let mut tiles = tiles.unwrap();
        let wt = tiles.remove(win_index);
        let h = Hand::new(&tiles);

        prop_assert_eq!(shanten_number(&h), 0);
        let wts = machi(&h);
        prop_assert!(wts.contains(&wt), "{} + {}", h, wt);
        for w in wts {
            prop_assert_eq!(shanten_number(&h.with(w)), -1, "{} + {}", h, w);
        }
    }

    // 総当たりの分解と同じシャンテン数になる
    #[test]
    fn shanten_matches_reference(tiles in tiles_strategy(13)) {
        let h = Hand::new(&tiles);
        prop_assert_eq!(shanten_number(&h), reference_shanten(&tiles), "{}", h);
    }

    // 和了点はドラのみでは発生しない
    #[test]
    fn score_requires_yaku(
        melds in prop::collection::vec((any::<bool>(), 0..KIND), 4),
        head in 0..KIND,
        win_index in 0..14usize,
        dora in subsequence((0..KIND).collect::<Vec<usize>>(), 0..3),
        is_tsumo in any::<bool>(),
        seat_wind in 1..=4usize,
    ) {
        let tiles = standard_win(&melds, head);
        prop_assume!(tiles.is_some());
        let mut tiles = tiles.unwrap();
        let wt = tiles.remove(win_index);
        let cond = WinCondition {
            seat_wind,
            is_tsumo,
            dora_indicators: dora.into_iter().map(Tile::from_index).collect(),
            ..Default::default()
        };

        let s = evaluate_hand(&Hand::new(&tiles), wt, &cond);
        prop_assert!(s.is_some());
        let s = s.unwrap();
        prop_assert!(s.points >= 0);
        let has_yaku = !s.yakuman.is_empty()
            || s.yaku.iter().any(|(name, _)| !DORA_NAMES.contains(&name.as_str()));
        prop_assert_eq!(s.points > 0, has_yaku);
        if !has_yaku {
            prop_assert!(s.yaku.is_empty());
        }
    }

    // 文字列化してパースすると元の手牌に戻る (副露と暗槓を含む)
    #[test]
    fn hand_round_trip(
        (calls, tiles) in prop::collection::vec((0..4usize, 0..KIND), 0..=4)
            .prop_flat_map(|cs| {
                let n = 13 - 3 * cs.len();
                (Just(cs), tiles_strategy(n))
            }),
    ) {
        let mut exp = tiles_to_string(&tiles);
        for &(kind, i) in &calls {
            exp.push_str(&call_string(kind, i));
        }
        let h = exp.parse::<Hand>();
        prop_assume!(h.is_ok());
        let h = h.unwrap();
        prop_assert_eq!(h.melds().len() + h.ankans().len(), calls.len());

        let s = h.to_string();
        let h2: Hand = s.parse().unwrap();
        prop_assert_eq!(h2.to_string(), s);
        prop_assert_eq!(h2, h);
    }
}
