use log::debug;

use super::{Bot, TableView};
use crate::hand::*;
use crate::model::*;

// [Call Candidates]
// 鳴きや槓に使用する手牌の牌を列挙する

// ポンに使う手牌の2枚
pub fn pon_candidates(hand: &Hand, discarded: Tile) -> Vec<[Tile; 2]> {
    if hand.count(discarded) >= 2 {
        vec![[discarded; 2]]
    } else {
        vec![]
    }
}

// チーに使う手牌の2枚 (上家の打牌に対してのみ)
pub fn chi_candidates(hand: &Hand, discarded: Tile) -> Vec<(Tile, Tile)> {
    if discarded.is_honor() {
        return vec![];
    }

    let Tile(ti, ni) = discarded;
    let mut check: Vec<(Tnum, Tnum)> = vec![];
    if 3 <= ni {
        check.push((ni - 2, ni - 1)); // 右端をチー
    }
    if (2..=8).contains(&ni) {
        check.push((ni - 1, ni + 1)); // 嵌張をチー
    }
    if ni <= 7 {
        check.push((ni + 1, ni + 2)); // 左端をチー
    }

    check
        .into_iter()
        .map(|(n0, n1)| (Tile(ti, n0), Tile(ti, n1)))
        .filter(|&(t0, t1)| hand.count(t0) > 0 && hand.count(t1) > 0)
        .collect()
}

#[inline]
pub fn can_daiminkan(hand: &Hand, discarded: Tile) -> bool {
    hand.count(discarded) == 3
}

pub fn ankan_candidates(hand: &Hand) -> Vec<Tile> {
    Tile::all().filter(|&t| hand.count(t) == 4).collect()
}

pub fn kakan_candidates(hand: &Hand) -> Vec<Tile> {
    hand.melds()
        .iter()
        .filter(|m| m.type_ == MeldType::Pon && hand.count(m.tile()) > 0)
        .map(|m| m.tile())
        .collect()
}

// リーチ後の暗槓
// ツモった牌(drawn)の暗槓のみ可能で, 待ちが変わらず, すべての和了形でその牌が暗刻として使われている場合に限る
// 待ちはツモ前の13枚(hand - drawn)で判定する
pub fn can_ankan_after_riichi(hand: &Hand, t: Tile, drawn: Tile) -> bool {
    if t != drawn || hand.count(t) != 4 {
        return false;
    }

    let h13 = match hand.without(drawn) {
        Ok(h) => h,
        Err(_) => return false,
    };
    let waits = machi(&h13);
    if waits.is_empty() {
        return false;
    }

    let mut h = hand.clone();
    if h.apply_meld(Meld::new(MeldType::Ankan, vec![t; 4]), &[t; 4]).is_err() {
        return false;
    }
    if machi(&h) != waits {
        return false;
    }

    waits.iter().all(|&w| {
        shanten(&h13.with(w)).decompositions.iter().all(|d| {
            d.shape == HandShape::Standard && d.melds.contains(&Block(BlockType::Koutsu, t))
        })
    })
}

// 打牌後の最小シャンテン数 (14枚の手牌)
fn best_discard_shanten(hand: &Hand) -> i32 {
    Tile::all()
        .filter(|&t| hand.count(t) > 0)
        .filter_map(|t| hand.without(t).ok())
        .map(|h| shanten_number(&h))
        .min()
        .unwrap_or(SHANTEN_IMPOSSIBLE)
}

fn is_yakuhai(t: Tile, view: &TableView) -> bool {
    t.is_dragon() || (t.is_wind() && (t.1 == view.round_wind || t.1 == view.seat_wind()))
}

// 鳴いた手牌に役の見込みがあるか (役牌の刻子, 断么九, 染め手)
fn has_yaku_source(hand: &Hand, view: &TableView) -> bool {
    if Tile::all().any(|t| is_yakuhai(t, view) && hand.count_all(t) >= 3) {
        return true;
    }

    let tiles: Vec<Tile> = hand
        .tiles()
        .into_iter()
        .chain(hand.calls().flat_map(|m| m.tiles.iter().copied()))
        .collect();
    if tiles.iter().all(|t| t.is_simple()) {
        return true;
    }

    let mut suits: Vec<Type> = tiles.iter().filter(|t| t.is_suit()).map(|t| t.0).collect();
    suits.sort();
    suits.dedup();
    suits.len() <= 1
}

// 打牌して役のある聴牌が取れるか (14枚の手牌)
fn has_tenpai_with_yaku(hand: &Hand, view: &TableView) -> bool {
    let cond = view.win_condition(false);
    Tile::all()
        .filter(|&t| hand.count(t) > 0)
        .filter_map(|t| hand.without(t).ok())
        .any(|h| {
            machi(&h).into_iter().any(|w| {
                evaluate_hand(&h, w, &cond)
                    .map(|s| s.has_yaku())
                    .unwrap_or(false)
            })
        })
}

impl Bot {
    // ポン, チーの共通判断
    // keep_shanten: シャンテン数が進まなくても鳴く(役牌のポン)
    fn should_call(
        &self,
        hand: &Hand,
        meld: Meld,
        from_hand: &[Tile],
        keep_shanten: bool,
        view: &TableView,
    ) -> bool {
        if view.is_riichi() || view.wall_count == 0 {
            return false;
        }

        let before = shanten_number(hand);
        let mut h = hand.clone();
        if h.apply_meld(meld, from_hand).is_err() {
            return false;
        }
        let after = best_discard_shanten(&h);
        debug!("call {:?}: shanten {} -> {}", from_hand, before, after);
        if after > before {
            return false;
        }

        // リーチ者がいる場合は聴牌になる鳴きのみ
        if view.is_riichi_other() {
            return after == 0 && has_tenpai_with_yaku(&h, view);
        }
        if after == 0 {
            return has_tenpai_with_yaku(&h, view);
        }
        (after < before || keep_shanten) && has_yaku_source(&h, view)
    }

    pub fn should_pon(&self, hand: &Hand, discarded: Tile, view: &TableView) -> bool {
        if pon_candidates(hand, discarded).is_empty() {
            return false;
        }
        let meld = Meld::new(MeldType::Pon, vec![discarded; 3]);
        self.should_call(hand, meld, &[discarded; 2], is_yakuhai(discarded, view), view)
    }

    // 手牌のpairを使ったチー
    pub fn should_chi(&self, hand: &Hand, discarded: Tile, pair: (Tile, Tile), view: &TableView) -> bool {
        let meld = match Meld::from_open_tiles(vec![discarded, pair.0, pair.1]) {
            Ok(m) if m.type_ == MeldType::Chi => m,
            _ => return false,
        };
        self.should_call(hand, meld, &[pair.0, pair.1], false, view)
    }

    // 鳴くべきチーのうち打牌後のシャンテン数が最も小さいもの
    pub fn best_chi(&self, hand: &Hand, discarded: Tile, view: &TableView) -> Option<(Tile, Tile)> {
        chi_candidates(hand, discarded)
            .into_iter()
            .filter(|&pair| self.should_chi(hand, discarded, pair, view))
            .min_by_key(|&(t0, t1)| {
                let mut h = hand.clone();
                let meld = Meld::new(MeldType::Chi, vec![discarded, t0, t1]);
                match h.apply_meld(meld, &[t0, t1]) {
                    Ok(_) => best_discard_shanten(&h),
                    Err(_) => SHANTEN_IMPOSSIBLE,
                }
            })
    }

    pub fn should_daiminkan(&self, hand: &Hand, discarded: Tile, view: &TableView) -> bool {
        if view.is_riichi() || view.wall_count == 0 || !can_daiminkan(hand, discarded) {
            return false;
        }

        let before = shanten_number(hand);
        let mut h = hand.clone();
        let meld = Meld::new(MeldType::Minkan, vec![discarded; 4]);
        if h.apply_meld(meld, &[discarded; 3]).is_err() {
            return false;
        }
        let after = shanten_number(&h);
        debug!("daiminkan {}: shanten {} -> {}", discarded, before, after);
        if after > before || (view.is_riichi_other() && before != 0) {
            return false;
        }

        // 門前を崩すのは役牌のみ
        (!hand.is_closed() || is_yakuhai(discarded, view)) && has_yaku_source(&h, view)
    }

    // 14枚の手牌でtを暗槓するべきか
    // drawn: 直前にツモった牌 (リーチ後は必須)
    pub fn should_ankan(
        &self,
        hand: &Hand,
        t: Tile,
        drawn: Option<Tile>,
        view: &TableView,
    ) -> bool {
        if view.wall_count == 0 || hand.count(t) != 4 {
            return false;
        }
        if view.is_riichi() {
            return match drawn {
                Some(d) => can_ankan_after_riichi(hand, t, d),
                None => false,
            };
        }

        let before = best_discard_shanten(hand);
        let mut h = hand.clone();
        if h.apply_meld(Meld::new(MeldType::Ankan, vec![t; 4]), &[t; 4]).is_err() {
            return false;
        }
        let after = shanten_number(&h);
        debug!("ankan {}: shanten {} -> {}", t, before, after);
        after <= before && !(view.is_riichi_other() && before != 0)
    }

    // 14枚の手牌でtを加槓するべきか
    pub fn should_kakan(&self, hand: &Hand, t: Tile, view: &TableView) -> bool {
        if view.is_riichi() || view.wall_count == 0 {
            return false;
        }

        let before = best_discard_shanten(hand);
        let mut h = hand.clone();
        if h.apply_kakan(t).is_err() {
            return false;
        }
        let after = shanten_number(&h);
        debug!("kakan {}: shanten {} -> {}", t, before, after);
        after <= before && !(view.is_riichi_other() && before != 0)
    }
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
fn test_candidates() {
    let h = hand("12455m678p11z");
    assert_eq!(
        chi_candidates(&h, Tile(TM, 3)),
        vec![
            (Tile(TM, 1), Tile(TM, 2)),
            (Tile(TM, 2), Tile(TM, 4)),
            (Tile(TM, 4), Tile(TM, 5)),
        ]
    );
    assert!(chi_candidates(&h, Tile(TZ, 1)).is_empty());
    assert_eq!(pon_candidates(&h, Tile(TM, 5)), vec![[Tile(TM, 5); 2]]);
    assert!(pon_candidates(&h, Tile(TM, 4)).is_empty());
    assert!(!can_daiminkan(&h, Tile(TM, 5)));

    let h = hand("1111m234p99s5z2z<5z5z5z>");
    assert_eq!(ankan_candidates(&h), vec![Tile(TM, 1)]);
    assert_eq!(kakan_candidates(&h), vec![Tile(TZ, DW)]);
}

#[test]
fn test_should_pon() {
    let bot = Bot::default();
    let v = view();

    // 役牌のポン
    let h = hand("55z123m456p78s29m1p");
    assert!(bot.should_pon(&h, Tile(TZ, DW), &v));

    // 役のないポン
    let h = hand("55m123m456p78s29m1z");
    assert!(!bot.should_pon(&h, Tile(TM, 5), &v));

    // リーチ者がいる場合は聴牌にならない鳴きはしない
    let mut v = view();
    v.riichi[2] = true;
    let h = hand("55z123m456p78s29m1p");
    assert!(!bot.should_pon(&h, Tile(TZ, DW), &v));

    // 自分がリーチ中
    let mut v = view();
    v.riichi[1] = true;
    assert!(!bot.should_pon(&h, Tile(TZ, DW), &v));
}

#[test]
fn test_best_chi() {
    let bot = Bot::default();
    let h = hand("234m567p33s68m46s8p");
    assert_eq!(
        bot.best_chi(&h, Tile(TS, 5), &view()),
        Some((Tile(TS, 4), Tile(TS, 6)))
    );

    assert!(!bot.should_chi(&h, Tile(TS, 5), (Tile(TS, 3), Tile(TS, 4)), &view()));

    // リーチ者がいても役のある聴牌になるなら鳴く
    let mut v = view();
    v.riichi[0] = true;
    assert_eq!(
        bot.best_chi(&h, Tile(TS, 5), &v),
        Some((Tile(TS, 4), Tile(TS, 6)))
    );
}

#[test]
fn test_should_daiminkan() {
    let bot = Bot::default();
    // 門前を崩す大明槓はしない
    let h = hand("555m123p456s78s19p");
    assert!(!bot.should_daiminkan(&h, Tile(TM, 5), &view()));

    // 役牌
    let h = hand("777z123p456s78s19p");
    assert!(bot.should_daiminkan(&h, Tile(TZ, DR), &view()));
}

#[test]
fn test_should_ankan() {
    let bot = Bot::default();
    let h = hand("1111m234p567s99s23z");
    assert!(bot.should_ankan(&h, Tile(TM, 1), None, &view()));
    assert!(bot.should_ankan(&h, Tile(TM, 1), Some(Tile(TZ, 3)), &view()));
    assert!(!bot.should_ankan(&h, Tile(TS, 9), None, &view()));
}

#[test]
fn test_ankan_after_riichi() {
    let m1 = Tile(TM, 1);

    // シャンポン待ちの暗刻
    let h = hand("1111m234p567s99s55z");
    assert!(can_ankan_after_riichi(&h, m1, m1));

    // 待ちが変わる
    let h = hand("11113m567p567s555z");
    assert!(!can_ankan_after_riichi(&h, m1, m1));

    // 手の内の4枚目はツモった牌ではない
    let h = hand("1111m234p567s99s55z");
    assert!(!can_ankan_after_riichi(&h, m1, Tile(TS, 9)));

    // 11113m567p567s99s (2m待ち) でリーチ後に3mをツモ
    // 3mを残した形ではシャンポン待ちに見えるが, ツモ前の待ちは2mのみ
    let h = hand("111133m567p567s99s");
    assert_eq!(machi(&hand("11113m567p567s99s")), vec![Tile(TM, 2)]);
    assert!(!can_ankan_after_riichi(&h, m1, Tile(TM, 3)));
    assert!(!can_ankan_after_riichi(&h, m1, m1));

    let mut v = view();
    v.riichi[1] = true;
    let bot = Bot::default();
    assert!(!bot.should_ankan(&h, m1, Some(Tile(TM, 3)), &v));

    let h = hand("1111m234p567s99s55z");
    assert!(bot.should_ankan(&h, m1, Some(m1), &v));
    // リーチ後はツモ牌が不明なら暗槓しない
    assert!(!bot.should_ankan(&h, m1, None, &v));
}

#[test]
fn test_should_kakan() {
    let bot = Bot::default();
    let h = hand("234p567s99s23z5z<5z5z5z>");
    assert!(bot.should_kakan(&h, Tile(TZ, DW), &view()));

    let mut v = view();
    v.riichi[3] = true;
    // 聴牌していない場合はリーチ者がいると加槓しない
    assert!(!bot.should_kakan(&h, Tile(TZ, DW), &v));
}
