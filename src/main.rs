#![warn(rust_2018_idioms)]
// 構造的な意味合いや一貫性を保つために以下の警告は無効化
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::needless_range_loop)]

mod app;

use log::error;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        error!("mode not specified");
        return;
    }

    let args2 = args[2..].to_vec();
    match args[1].as_str() {
        "C" => {
            // Calculator (役計算モード)
            app::CalculatorApp::new(args2).run();
        }
        "S" => {
            // Shanten (シャンテン数計算モード)
            app::ShantenApp::new(args2).run();
        }
        "A" => {
            // Advisor (打牌, 副露判断モード)
            app::AdvisorApp::new(args2).run();
        }
        m => {
            error!("unknown mode: {}", m)
        }
    }
}
