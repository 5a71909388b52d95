use super::shanten::{shanten_number, shanten_with_cache, PatternCache};
use crate::model::*;

// 和了形の判定
#[inline]
pub fn is_win(hand: &Hand) -> bool {
    shanten_number(hand) == -1
}

// 聴牌の判定
#[inline]
pub fn is_tenpai(hand: &Hand) -> bool {
    shanten_number(hand) == 0
}

// 待ち牌のリストを牌種Index順に返却
// 聴牌していない場合は空のリストを返却
pub fn machi(hand: &Hand) -> Vec<Tile> {
    machi_with_cache(hand, &mut PatternCache::new())
}

fn machi_with_cache(hand: &Hand, cache: &mut PatternCache) -> Vec<Tile> {
    Tile::all()
        .filter(|&t| shanten_with_cache(&hand.with(t), cache).shanten == -1)
        .collect()
}

// 聴牌になる打牌とその待ち牌のリストを返却 (14枚の手牌)
pub fn tenpai_discards(hand: &Hand) -> Vec<(Tile, Vec<Tile>)> {
    let mut res = vec![];
    let mut cache = PatternCache::new();
    for t in Tile::all() {
        if let Ok(h) = hand.without(t) {
            let wts = machi_with_cache(&h, &mut cache);
            if !wts.is_empty() {
                res.push((t, wts));
            }
        }
    }
    res
}

#[cfg(test)]
fn tiles(exp: &str) -> Vec<Tile> {
    tiles_from_string(exp).unwrap()
}

#[test]
fn test_machi() {
    let cases = [
        ("1112345678999m", "123456789m"),
        ("123m456p789s1z2z2z2z", "1z"),
        ("123m456p789s11z22z", "1z2z"),
        ("11m22p33s44m55p66s7z", "7z"),
        ("19m19p19s1234567z", "19m19p19s1234567z"),
        ("123m456p789s1z2z3z4z", ""),
    ];
    for (exp, wts) in cases {
        let h: Hand = exp.parse().unwrap();
        assert_eq!(machi(&h), tiles(wts), "{}", exp);
    }
}

#[test]
fn test_machi_with_melds() {
    let h: Hand = "5p<2z2z2z><5p6p7p><9s9s9s9s>(1p1p1p1p)".parse().unwrap();
    assert!(is_tenpai(&h));
    assert_eq!(machi(&h), tiles("5p"));
    assert!(is_win(&h.with(Tile(TP, 5))));
}

#[test]
fn test_tenpai_discards() {
    let h: Hand = "123m456p789s11z22z5z".parse().unwrap();
    let res = tenpai_discards(&h);
    assert_eq!(res.len(), 1);
    assert_eq!(res[0].0, Tile(TZ, DW));
    assert_eq!(res[0].1, tiles("12z"));
}
