// 打牌, リーチ, 鳴きを判断する思考ルーチン
mod call;
mod config;
mod discard;

pub use self::{
    call::{
        ankan_candidates, can_ankan_after_riichi, can_daiminkan, chi_candidates,
        kakan_candidates, pon_candidates,
    },
    config::AiConfig,
    discard::{can_riichi, Bot, TableView},
};
