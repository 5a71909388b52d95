use std::fmt::Write;
use std::fs::File;
use std::io::{self, BufRead};

use log::error;

use mahjong_engine::util::misc::*;
use mahjong_engine::hand::*;
use mahjong_engine::model::*;

#[derive(Debug)]
pub struct CalculatorApp {
    args: Vec<String>,
    detail: bool,
}

impl CalculatorApp {
    pub fn new(args: Vec<String>) -> Self {
        Self {
            args,
            detail: false,
        }
    }

    pub fn run(&mut self) {
        let mut file_path = "".to_string();
        let mut exp = "".to_string();
        let mut it = self.args.iter();
        while let Some(s) = it.next() {
            match s.as_str() {
                "-d" => self.detail = true,
                "-f" => match next_value(&mut it, s) {
                    Ok(v) => file_path = v,
                    Err(e) => {
                        error!("{}", e);
                        return;
                    }
                },
                _ => {
                    if s.starts_with('-') {
                        error!("unknown option: {}", s);
                        return;
                    }
                    if !exp.is_empty() {
                        error!("multiple expression is not allowed");
                        return;
                    }
                    exp = s.clone();
                }
            }
        }

        if file_path.is_empty() == exp.is_empty() {
            print_usage();
            return;
        }

        let res = if !exp.is_empty() {
            self.process_expression(&exp)
        } else {
            self.run_from_file(&file_path)
        };
        if let Err(e) = res {
            error!("{}", e);
        }
    }

    fn run_from_file(&self, file_path: &str) -> Res {
        let file = File::open(file_path)?;
        let lines = io::BufReader::new(file).lines();
        for exp in lines.map_while(Result::ok) {
            let e = exp.replace(' ', "");
            if e.is_empty() || e.starts_with('#') {
                // 空行とコメント行はスキップ
                println!("> {}", exp);
            } else if let Err(e) = self.process_expression(&exp) {
                error!("{}", e);
            }
            println!();
        }
        Ok(())
    }

    fn process_expression(&self, exp: &str) -> Res {
        let mut calculator = Calculator::new(self.detail);
        calculator.parse(exp)?;
        calculator.run();
        Ok(())
    }
}

#[derive(Debug, PartialEq)]
enum Verify {
    Ok,
    Error,
    Skip,
}

// 入力形式: 手牌,和了牌[+]/場風自風,ドラ表示牌,裏ドラ表示牌/状況,.../符,翻,点数
// 状況: riichi, double, ippatsu, haitei, rinshan, chankan, first, aka=N
// 和了牌の後ろの'+'はロン和了
#[derive(Debug)]
struct Calculator {
    detail: bool,
    // evaluate_hand params
    hand: Hand,
    winning_tile: Tile,
    cond: WinCondition,
    // score verify
    verify: bool,
    fu: usize,
    fan: usize,
    points: Point,
}

impl Calculator {
    fn new(detail: bool) -> Self {
        Self {
            detail,
            hand: Hand::default(),
            winning_tile: Tile(TZ, DR),
            cond: WinCondition {
                is_tsumo: true,
                ..Default::default()
            },
            verify: false,
            fu: 0,
            fan: 0,
            points: 0,
        }
    }

    fn parse(&mut self, input: &str) -> Res {
        println!("> {}", input);

        let input = input.replace(' ', "");
        let input = input.split('#').next().unwrap_or(""); // コメント削除
        let exps: Vec<&str> = input.split('/').collect();
        let len = exps.len();
        if len > 0 {
            self.parse_hand(exps[0])?;
        }
        if len > 1 {
            self.parse_stage_info(exps[1])?;
        }
        if len > 2 {
            self.parse_conditions(exps[2])?;
        }
        if len > 3 {
            self.parse_score_verify(exps[3])?;
        }

        if self.detail {
            println!("{:?}", self);
        }

        Ok(())
    }

    fn run(&self) -> Verify {
        let verify = match evaluate_hand(&self.hand, self.winning_tile, &self.cond) {
            Some(s) if s.has_yaku() => {
                if self.detail {
                    println!("{:?}", s);
                }

                let mut yakus = "".to_string();
                for (name, n) in s.yaku.iter().chain(s.yakuman.iter()) {
                    let _ = write!(yakus, "{}({}), ", name, n);
                }
                println!("yakus: {}", yakus);
                println!(
                    "fu: {}, fan: {}, yakuman: {}, points: {}, {}",
                    s.fu, s.fan, s.yakuman_count, s.points, s.title
                );
                if self.cond.is_tsumo {
                    let (_, d, c) = s.payments;
                    println!("tsumo: {} / {}", c, d);
                }

                if !self.verify {
                    Verify::Skip
                } else if s.yakuman_count > 0 {
                    // 役満以上は得点のみをチェック
                    if s.points == self.points {
                        Verify::Ok
                    } else {
                        Verify::Error
                    }
                } else if s.fu == self.fu && s.fan == self.fan && s.points == self.points {
                    Verify::Ok
                } else {
                    Verify::Error
                }
            }
            s => {
                if s.is_some() {
                    println!("no yaku");
                } else {
                    println!("not win hand");
                }

                if !self.verify {
                    Verify::Skip
                } else if self.points == 0 {
                    Verify::Ok
                } else {
                    Verify::Error
                }
            }
        };
        println!("verify: {:?}", verify);
        verify
    }

    fn parse_hand(&mut self, input: &str) -> Res {
        let (exp_hand, exp_wt) = input
            .split_once(',')
            .ok_or_else(|| format!("winning tile missing: {}", input))?;
        let exp_wt = match exp_wt.strip_suffix('+') {
            Some(e) => {
                self.cond.is_tsumo = false;
                e
            }
            None => exp_wt,
        };
        self.hand = exp_hand.parse()?;
        self.winning_tile = exp_wt.parse()?;
        Ok(())
    }

    fn parse_stage_info(&mut self, input: &str) -> Res {
        let exps: Vec<&str> = input.split(',').collect();
        let len = exps.len();
        if len > 0 && !exps[0].is_empty() {
            let chars: Vec<char> = exps[0].chars().collect();
            if chars.len() != 2 {
                Err(format!("stage info len is not 2: {}", exps[0]))?;
            }
            self.cond.round_wind = wind_from_char(chars[0])?;
            self.cond.seat_wind = wind_from_char(chars[1])?;
        }
        if len > 1 {
            self.cond.dora_indicators = tiles_from_string(exps[1])?;
        }
        if len > 2 {
            self.cond.ura_indicators = tiles_from_string(exps[2])?;
        }
        Ok(())
    }

    fn parse_conditions(&mut self, input: &str) -> Res {
        for y in input.split(',') {
            match y {
                "riichi" => self.cond.riichi = Riichi::Single,
                "double" => self.cond.riichi = Riichi::Double,
                "ippatsu" => self.cond.ippatsu = true,
                "haitei" => self.cond.haitei = true,
                "rinshan" => self.cond.rinshan_tsumo = true,
                "chankan" => self.cond.rinshan_ron = true,
                "first" => self.cond.first_turn = true,
                "" => {}
                _ => {
                    if let Some(n) = y.strip_prefix("aka=") {
                        self.cond.aka = n.parse()?;
                    } else {
                        Err(format!("invalid condition: {}", y))?;
                    }
                }
            }
        }
        Ok(())
    }

    fn parse_score_verify(&mut self, input: &str) -> Res {
        let exps: Vec<&str> = input.split(',').collect();
        if exps.len() != 3 {
            Err(format!("invalid score verify info: {}", input))?;
        }
        self.fu = exps[0].parse()?;
        self.fan = exps[1].parse()?;
        self.points = exps[2].parse()?;
        self.verify = true;
        Ok(())
    }
}

fn wind_from_char(c: char) -> Res<Tnum> {
    let w = match c {
        'E' => WE,
        'S' => WS,
        'W' => WW,
        'N' => WN,
        _ => Err(format!("invalid wind symbol: {}", c))?,
    };
    Ok(w)
}

fn print_usage() {
    error!(
        r"invalid input
Usage
    $ cargo run C EXPRESSION [-d]
    $ cargo run C -f FILE [-d]
Expression
    HAND,WINNING_TILE[+]/WINDS,DORA,URA_DORA/CONDITIONS/FU,FAN,POINTS
    ex: 234m567p23478s99m,9s+/ES,1m/riichi,aka=1/30,4,7700
Options
    -d: print debug info
    -f: read expresisons from file instead of a commandline expression
"
    );
}

#[test]
fn test_calculator() {
    let file = File::open("tests/win_hands.txt").unwrap();
    let lines = io::BufReader::new(file).lines();
    for exp in lines.map_while(Result::ok) {
        let e = exp.replace(' ', "");
        if e.is_empty() || e.starts_with('#') {
            // 空行とコメント行はスキップ
            println!("> {}", exp);
        } else {
            let mut calculator = Calculator::new(false);
            calculator.parse(&e).unwrap();
            assert_eq!(Verify::Ok, calculator.run(), "{}", exp);
        }
    }
}

#[test]
fn test_parse_expression() {
    let mut c = Calculator::new(false);
    c.parse("234m567p78s99m<5p6p7p>,9s+/SW,1m,2m/haitei,aka=2").unwrap();
    assert!(!c.cond.is_tsumo);
    assert_eq!(c.winning_tile, Tile(TS, 9));
    assert_eq!((c.cond.round_wind, c.cond.seat_wind), (WS, WW));
    assert_eq!(c.cond.dora_indicators, vec![Tile(TM, 1)]);
    assert_eq!(c.cond.ura_indicators, vec![Tile(TM, 2)]);
    assert!(c.cond.haitei);
    assert_eq!(c.cond.aka, 2);
    assert!(!c.verify);

    let mut c = Calculator::new(false);
    assert!(c.parse("234m567p78s99m").is_err());
    let mut c = Calculator::new(false);
    assert!(c.parse("234m567p23478s99m,9s/EX").is_err());
}
