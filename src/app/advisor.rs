use std::fs;

use log::{debug, error, info};
use rand::SeedableRng;
use serde::Deserialize;

use mahjong_engine::ai::*;
use mahjong_engine::model::*;
use mahjong_engine::util::misc::*;

// 打牌と副露の判断を表示
#[derive(Debug)]
pub struct AdvisorApp {
    args: Vec<String>,
}

// 入力ファイル(json)
// { "hand": "123m456p...", "drawn": "3m", "discarded": "5z", "view": { TableView } }
#[derive(Debug, Deserialize)]
struct Situation {
    hand: Hand,
    #[serde(default)]
    drawn: Option<Tile>, // 直前のツモ牌 (リーチ後の暗槓の判断)
    #[serde(default)]
    discarded: Option<Tile>, // 他家の打牌 (副露の判断)
    #[serde(default)]
    view: TableView,
}

impl AdvisorApp {
    pub fn new(args: Vec<String>) -> Self {
        Self { args }
    }

    pub fn run(&mut self) {
        if let Err(e) = self.run_inner() {
            error!("{}", e);
        }
    }

    fn run_inner(&self) -> Res {
        let mut config_path = "".to_string();
        let mut seed: Option<u64> = None;
        let mut file_path = "".to_string();
        let mut it = self.args.iter();
        while let Some(s) = it.next() {
            match s.as_str() {
                "-c" => config_path = next_value(&mut it, s)?,
                "-s" => seed = Some(next_value(&mut it, s)?),
                _ if s.starts_with('-') => Err(format!("unknown option: {}", s))?,
                _ => file_path = s.clone(),
            }
        }

        if file_path.is_empty() {
            print_usage();
            return Ok(());
        }

        let config = if config_path.is_empty() {
            AiConfig::default()
        } else {
            AiConfig::from_file(&config_path)?
        };
        let bot = Bot::new(config);
        debug!("config: {:?}", bot.config());

        let s = load_situation(&fs::read_to_string(&file_path)?)?;
        info!("hand: {}", s.hand);
        match s.discarded {
            Some(d) => advise_call(&bot, &s.hand, d, &s.view),
            None => {
                let seed = seed.unwrap_or_else(rand::random);
                let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
                advise_discard(&bot, &s.hand, s.drawn, &s.view, &mut rng)
            }
        }
        Ok(())
    }
}

fn load_situation(json: &str) -> Res<Situation> {
    let s: Situation = serde_json::from_str(json)?;
    s.view.validate()?;
    if let Some(d) = s.drawn {
        if s.hand.count(d) == 0 {
            Err(format!("drawn tile not in hand: {}", d))?;
        }
    }
    Ok(s)
}

fn advise_discard(
    bot: &Bot,
    hand: &Hand,
    drawn: Option<Tile>,
    view: &TableView,
    rng: &mut rand::rngs::StdRng,
) {
    let mut scores = bot.evaluate_discards(hand, view);
    scores.sort_by(|a, b| b.1.cmp(&a.1));
    for (t, p) in &scores {
        println!("{}: {}", t, p);
    }

    if let Some(t) = bot.choose_discard(hand, view, rng) {
        let riichi = bot.should_riichi(hand, t, view);
        println!("discard: {}{}", t, if riichi { " (riichi)" } else { "" });
    }
    for t in ankan_candidates(hand) {
        if bot.should_ankan(hand, t, drawn, view) {
            println!("ankan: {}", t);
        }
    }
    for t in kakan_candidates(hand) {
        if bot.should_kakan(hand, t, view) {
            println!("kakan: {}", t);
        }
    }
}

fn advise_call(bot: &Bot, hand: &Hand, discarded: Tile, view: &TableView) {
    if can_daiminkan(hand, discarded) && bot.should_daiminkan(hand, discarded, view) {
        println!("daiminkan: {}", discarded);
    }
    if !pon_candidates(hand, discarded).is_empty() && bot.should_pon(hand, discarded, view) {
        println!("pon: {}", discarded);
    }
    if let Some((a, b)) = bot.best_chi(hand, discarded, view) {
        println!("chi: {} with {}{}", discarded, a, b);
    }
}

fn print_usage() {
    error!(
        r"invalid input
Usage
    $ cargo run A FILE [-c CONFIG] [-s SEED]
Options
    -c: ai config file (json)
    -s: random seed for tie-breaking
"
    );
}

#[test]
fn test_load_situation() {
    let s = load_situation(
        r#"{"hand": "111133m567p567s99s", "drawn": "3m", "view": {"seat": 1, "riichi": [false, true, false, false]}}"#,
    )
    .unwrap();
    assert_eq!(s.drawn, Some(Tile(TM, 3)));
    assert!(s.view.is_riichi());
    assert!(!Bot::default().should_ankan(&s.hand, Tile(TM, 1), s.drawn, &s.view));

    assert!(load_situation(r#"{"hand": "123m", "view": {"seat": 5}}"#).is_err());
    assert!(load_situation(r#"{"hand": "123m", "view": {"dealer": 4}}"#).is_err());
    assert!(load_situation(r#"{"hand": "123m", "view": {"round_wind": 9}}"#).is_err());
    assert!(load_situation(r#"{"hand": "123m", "drawn": "5z"}"#).is_err());
}
