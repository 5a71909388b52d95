// 手牌のシャンテン数, 待ち, 役や点数計算を行うモジュール
mod evaluate;
mod point;
mod shanten;
mod win;
mod yaku;

pub use self::{
    evaluate::{evaluate_hand, score, Riichi, Score, WinCondition},
    point::{calc_base_point, calc_points, get_score_title},
    shanten::{
        calc_shanten, shanten, shanten_number, shanten_with_cache, split_isolated, Block,
        BlockType, Decomposition, HandShape, PatternCache, ShantenResult, SHANTEN_IMPOSSIBLE,
    },
    win::{is_tenpai, is_win, machi, tenpai_discards},
    yaku::{wait_patterns, Wait, YakuContext, YakuFlags},
};
