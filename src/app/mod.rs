// mainから直接呼び出すアプリケーションの動作モード(C, S, A)のモジュール

mod advisor;
mod calculator;
mod shanten;

pub use advisor::AdvisorApp;
pub use calculator::CalculatorApp;
pub use shanten::ShantenApp;
