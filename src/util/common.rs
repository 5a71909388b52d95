use crate::model::*;

// ドラ表示牌のリストを受け取ってドラの枚数テーブルを返却
pub fn create_dora_table(indicators: &[Tile]) -> TileTable {
    let mut dt = TileTable::default();
    for d in indicators {
        let t = d.next_dora();
        dt[t.0][t.1] += 1;
    }
    dt
}

// ドラ表示牌によるドラの数を勘定 (副露, 暗槓を含む)
pub fn count_dora(hand: &Hand, indicators: &[Tile]) -> usize {
    let dt = create_dora_table(indicators);
    let mut n_dora = 0;

    for t in hand.tiles() {
        n_dora += dt[t.0][t.1];
    }

    for m in hand.calls() {
        for t in &m.tiles {
            n_dora += dt[t.0][t.1];
        }
    }

    n_dora
}

#[test]
fn test_count_dora() {
    let hand: Hand = "1m2m3m9p9p<1z1z1z>(9s9s9s9s)".parse().unwrap();
    let inds = tiles_from_string("8p4z8s").unwrap();
    assert_eq!(count_dora(&hand, &inds), 2 + 3 + 4);
    let inds = tiles_from_string("8p8p").unwrap();
    assert_eq!(count_dora(&hand, &inds), 4);
}
