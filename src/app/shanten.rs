use log::error;

use mahjong_engine::hand::*;
use mahjong_engine::model::*;
use mahjong_engine::util::misc::*;

// 手牌のシャンテン数, 分解, 待ちを表示
#[derive(Debug)]
pub struct ShantenApp {
    args: Vec<String>,
    detail: bool,
}

impl ShantenApp {
    pub fn new(args: Vec<String>) -> Self {
        Self {
            args,
            detail: false,
        }
    }

    pub fn run(&mut self) {
        let mut exps = vec![];
        for s in &self.args {
            match s.as_str() {
                "-d" => self.detail = true,
                _ if s.starts_with('-') => {
                    error!("unknown option: {}", s);
                    return;
                }
                _ => exps.push(s.clone()),
            }
        }

        if exps.is_empty() {
            print_usage();
            return;
        }

        for exp in &exps {
            if let Err(e) = self.process_expression(exp) {
                error!("{}", e);
            }
        }
    }

    fn process_expression(&self, exp: &str) -> Res {
        println!("> {}", exp);
        let hand: Hand = exp.parse()?;
        let res = shanten(&hand);
        if res.shanten == SHANTEN_IMPOSSIBLE {
            Err(format!("too few tiles: {}", hand))?;
        }
        println!("shanten: {}", res.shanten);

        for d in &res.decompositions {
            if self.detail {
                println!("  {:?}", d);
            } else {
                println!("  {}", d);
            }
        }

        match hand.concealed_len() % 3 {
            1 => {
                let wts = machi(&hand);
                if !wts.is_empty() {
                    println!("machi: {}", vec_to_string(&wts));
                }
            }
            2 => {
                for (t, wts) in tenpai_discards(&hand) {
                    println!("discard {}: machi {}", t, vec_to_string(&wts));
                }
            }
            _ => {}
        }
        println!();
        Ok(())
    }
}

fn print_usage() {
    error!(
        r"invalid input
Usage
    $ cargo run S HAND... [-d]
Options
    -d: print decompositions in detail
"
    );
}
