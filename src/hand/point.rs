use crate::model::{Point, Points};

fn ceil(n: Point) -> Point {
    (n + 99) / 100 * 100
}

// 基本点
pub fn calc_base_point(fu: usize, fan: usize, yakuman: usize) -> Point {
    (if yakuman == 0 {
        let base = fu * 2_usize.pow(fan as u32 + 2);
        if base >= 2000 || fan >= 5 {
            match fan {
                0..=5 => 2000,   // 満貫
                6..=7 => 3000,   // 跳満
                8..=10 => 4000,  // 倍満
                11..=12 => 6000, // 三倍満
                _ => 8000,       // 数え役満
            }
        } else {
            base
        }
    } else {
        8000 * yakuman
    }) as Point
}

pub fn get_score_title(base_point: Point, yakuman: usize) -> String {
    match yakuman {
        0 => match base_point {
            2000 => "満貫",
            3000 => "跳満",
            4000 => "倍満",
            6000 => "三倍満",
            8000 => "数え役満",
            _ => "",
        },
        1 => "役満",
        2 => "二倍役満",
        3 => "三倍役満",
        4 => "四倍役満",
        5 => "五倍役満",
        6 => "六倍役満",
        7 => "七倍役満",
        _ => "N倍役満",
    }
    .to_string()
}

// (直撃, ツモ和了の親の支払い, ツモ和了の子の支払い)と称号を返却
// 親のツモ和了の場合は子全員が2つ目の値を支払う
pub fn calc_points(is_dealer: bool, fu: usize, fan: usize, yakuman: usize) -> (Points, String) {
    let base = calc_base_point(fu, fan, yakuman);
    let title = get_score_title(base, yakuman);
    if is_dealer {
        ((ceil(base * 6), ceil(base * 2), ceil(base * 2)), title)
    } else {
        ((ceil(base * 4), ceil(base * 2), ceil(base)), title)
    }
}

#[test]
fn test_points_table() {
    // 子
    assert_eq!(calc_points(false, 30, 1, 0).0, (1000, 500, 300));
    assert_eq!(calc_points(false, 40, 3, 0).0, (5200, 2600, 1300));
    assert_eq!(calc_points(false, 20, 2, 0).0, (1300, 700, 400));
    assert_eq!(calc_points(false, 25, 2, 0).0, (1600, 800, 400));
    assert_eq!(calc_points(false, 30, 4, 0).0, (7700, 3900, 2000));
    assert_eq!(calc_points(false, 70, 3, 0).0, (8000, 4000, 2000));
    assert_eq!(calc_points(false, 30, 6, 0), ((12000, 6000, 3000), "跳満".to_string()));
    assert_eq!(calc_points(false, 30, 13, 0).0 .0, 32000);
    // 親
    assert_eq!(calc_points(true, 30, 1, 0).0, (1500, 500, 500));
    assert_eq!(calc_points(true, 40, 2, 0).0, (3900, 1300, 1300));
    assert_eq!(calc_points(true, 20, 5, 1), ((48000, 16000, 16000), "役満".to_string()));
    assert_eq!(calc_points(true, 20, 5, 2).0 .0, 96000);
}

// cargo test --release print_points_table -- --nocapture
#[test]
fn print_points_table() {
    let fu_list = [20, 25, 30, 40, 50, 60, 70, 80, 90, 100, 110];

    println!("点数計算表 (子) ============================================");
    for fu in fu_list {
        print!("[{fu:3}符] ");
        for fan in 1..=4 {
            let (scores, _) = calc_points(false, fu, fan, 0);
            print!("{fan}飜:{:5}({:4}/{:4}) ", scores.0, scores.2, scores.1)
        }
        println!();
    }
    println!();

    println!("点数計算表 (親) ============================================");
    for fu in fu_list {
        print!("[{fu:3}符] ");
        for fan in 1..=4 {
            let (scores, _) = calc_points(true, fu, fan, 0);
            print!("{fan}飜:{:5}({:4}) ", scores.0, scores.1)
        }
        println!();
    }
}
