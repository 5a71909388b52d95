use mahjong_engine::hand::*;
use mahjong_engine::model::*;
use mahjong_engine::settlement;

fn hand(exp: &str) -> Hand {
    exp.parse().unwrap()
}

fn tiles(exp: &str) -> Vec<Tile> {
    tiles_from_string(exp).unwrap()
}

#[test]
fn test_yakuhai_ron() {
    // 南家の南の明刻 (シャンポン待ちのロン)
    let h = hand("123m456p789s11z22z");
    let wt = Tile(TZ, WS);
    assert_eq!(shanten_number(&h.with(wt)), -1);

    let cond = WinCondition {
        round_wind: WE,
        seat_wind: WS,
        ..Default::default()
    };
    let s = evaluate_hand(&h, wt, &cond).unwrap();
    let names: Vec<&str> = s.yaku.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["自風"]);
    // 20 + 門前ロン10 + 字牌の明刻4 + 場風の雀頭2 = 36 -> 40符
    assert_eq!((s.fu, s.fan), (40, 1));
    assert_eq!(s.points, 1300);

    // 点数表: 子30符1翻ロン
    assert_eq!(calc_points(false, 30, 1, 0).0 .0, 1000);
    assert_eq!(calc_points(true, 30, 1, 0).0 .0, 1500);
}

#[test]
fn test_chiitoitsu_tenpai() {
    let h = hand("11m22p33s44m55p66s7z");
    let res = shanten(&h);
    assert_eq!(res.shanten, 0);
    assert!(res
        .decompositions
        .iter()
        .any(|d| d.shape == HandShape::SevenPairs));
    assert_eq!(machi(&h), vec![Tile(TZ, 7)]);
}

#[test]
fn test_kokushi_13_sided() {
    let h = hand("19m19p19s1234567z");
    assert_eq!(shanten_number(&h), 0);
    let wts = machi(&h);
    assert_eq!(wts, tiles("19m19p19s1234567z"));
    assert!(wts.iter().all(|t| t.is_end()));
}

#[test]
fn test_four_calls_tanki() {
    let h = hand("5p<2z2z2z><5p6p7p><9s9s9s9s>(1p1p1p1p)");
    assert_eq!(h.concealed_len(), 1);
    assert!(!h.is_closed());

    let res = shanten(&h);
    assert_eq!(res.shanten, 0);
    assert_eq!(res.decompositions.len(), 1);
    let d = &res.decompositions[0];
    assert_eq!(d.melds.len(), 4);
    assert!(d.partials.is_empty());
    assert_eq!(d.isolated, vec![Tile(TP, 5)]);
    assert_eq!(machi(&h), vec![Tile(TP, 5)]);
}

#[test]
fn test_draw_two_tenpai() {
    let d = settlement::draw([true, false, false, true]);
    assert_eq!(d, [1500, -1500, -1500, 1500]);
    assert_eq!(d.iter().sum::<Point>(), 0);
}

#[test]
fn test_round_trip() {
    for exp in [
        "1m2m3m4p5p6p7s8s9s1z1z2z2z",
        "5p<2z2z2z><5p6p7p><9s9s9s9s>(1p1p1p1p)",
        "1m9m1p9p1s9s1z2z3z4z5z6z7z",
    ] {
        let h = hand(exp);
        assert_eq!(h.to_string(), exp);
        assert_eq!(hand(&h.to_string()), h);
    }
    // 門前の牌は牌種順に並べ替えられる
    assert_eq!(hand("9s1m5z1m").to_string(), "1m1m9s5z");
}

#[test]
fn test_parse_errors() {
    use mahjong_engine::Error;

    assert!(matches!("1x".parse::<Hand>(), Err(Error::MalformedHand(_))));
    assert!(matches!("11111m".parse::<Hand>(), Err(Error::TooManyCopies(_))));
    assert!(matches!("123m<1m2m4m>".parse::<Hand>(), Err(Error::MalformedHand(_))));
    assert!(matches!(
        "123456789m123456p".parse::<Hand>(),
        Err(Error::TooManyTiles(15))
    ));
}
