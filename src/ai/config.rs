use serde::{Deserialize, Serialize};

use crate::util::misc::Res;

// 打牌・鳴き判断の重み
// JSONで指定されなかった項目は既定値を使用
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub shanten_step: i64,    // シャンテン数1つあたり
    pub tenpai_bonus: i64,    // 聴牌を崩さない
    pub meld: i64,            // 面子
    pub head: i64,            // 雀頭
    pub ryanmen: i64,         // 両面塔子
    pub toitsu: i64,          // 対子
    pub penchan: i64,         // 辺張塔子
    pub kanchan: i64,         // 嵌張塔子
    pub isolated: i64,        // 孤立牌を切る
    pub own_discard: i64,     // 自分の河にある牌を切る
    pub dora: i64,            // ドラを切る
    pub genbutsu: i64,        // リーチ者の現物を切る
    pub dealer_genbutsu: i64, // 親リーチの現物への追加分
    pub riichi_min_wall: usize,   // リーチに必要な牌山の残り枚数
    pub riichi_min_waits: usize,  // 即リーチする待ちの種類数
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            shanten_step: 1000,
            tenpai_bonus: 10000,
            meld: 90,
            head: 20,
            ryanmen: 40,
            toitsu: 20,
            penchan: 5,
            kanchan: 10,
            isolated: 500,
            own_discard: 10,
            dora: -50,
            genbutsu: 2000,
            dealer_genbutsu: 1000,
            riichi_min_wall: 4,
            riichi_min_waits: 2,
        }
    }
}

impl AiConfig {
    pub fn from_file(path: &str) -> Res<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

#[test]
fn test_partial_config() {
    let c: AiConfig = serde_json::from_str(r#"{"isolated": 300, "dora": -100}"#).unwrap();
    assert_eq!(c.isolated, 300);
    assert_eq!(c.dora, -100);
    assert_eq!(c.meld, 90);
    assert_eq!(c.genbutsu, 2000);

    let c: AiConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(c, AiConfig::default());
}
