use std::str::FromStr;

use serde::{de, ser};

use super::*;
use crate::error::{Error, Result};

// 手牌 (門前の牌 + 副露 + 暗槓)
// 門前の牌は枚数テーブルで保持するため常に牌種Index順となる
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Hand {
    concealed: TileTable,
    melds: Vec<Meld>,  // チー, ポン, 明槓 (鳴いた順)
    ankans: Vec<Meld>, // 暗槓
}

impl Hand {
    pub fn new(tiles: &[Tile]) -> Self {
        Self {
            concealed: tiles_to_tile_table(tiles),
            ..Default::default()
        }
    }

    #[inline]
    pub fn concealed(&self) -> &TileTable {
        &self.concealed
    }

    #[inline]
    pub fn melds(&self) -> &[Meld] {
        &self.melds
    }

    #[inline]
    pub fn ankans(&self) -> &[Meld] {
        &self.ankans
    }

    // 副露と暗槓
    pub fn calls(&self) -> impl Iterator<Item = &Meld> {
        self.melds.iter().chain(self.ankans.iter())
    }

    #[inline]
    pub fn count(&self, t: Tile) -> usize {
        self.concealed[t.0][t.1]
    }

    // 副露を含めた牌の枚数
    pub fn count_all(&self, t: Tile) -> usize {
        let n: usize = self
            .calls()
            .map(|m| m.tiles.iter().filter(|&&x| x == t).count())
            .sum();
        self.count(t) + n
    }

    // 門前の牌 (ソート済み)
    pub fn tiles(&self) -> Vec<Tile> {
        tiles_from_tile_table(&self.concealed)
    }

    pub fn concealed_len(&self) -> usize {
        self.concealed.iter().map(|r| r.iter().sum::<usize>()).sum()
    }

    // 槓子は3枚として数えた手牌の枚数 (13 or 14)
    pub fn len(&self) -> usize {
        self.concealed_len() + 3 * (self.melds.len() + self.ankans.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // 門前 (暗槓は門前扱い)
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.melds.is_empty()
    }

    #[inline]
    pub fn has_calls(&self) -> bool {
        !self.melds.is_empty() || !self.ankans.is_empty()
    }

    pub fn add(&mut self, t: Tile) {
        self.concealed[t.0][t.1] += 1;
    }

    // 指定した牌を1枚削除
    pub fn remove(&mut self, t: Tile) -> Result<()> {
        if self.concealed[t.0][t.1] == 0 {
            return Err(Error::TileNotFound(t));
        }
        self.concealed[t.0][t.1] -= 1;
        Ok(())
    }

    pub fn with(&self, t: Tile) -> Self {
        let mut h = self.clone();
        h.add(t);
        h
    }

    pub fn without(&self, t: Tile) -> Result<Self> {
        let mut h = self.clone();
        h.remove(t)?;
        Ok(h)
    }

    // 手牌から牌を抜き出して副露(暗槓)を追加
    pub fn apply_meld(&mut self, meld: Meld, from_hand: &[Tile]) -> Result<()> {
        let mut h = self.concealed;
        for &t in from_hand {
            if h[t.0][t.1] == 0 {
                return Err(Error::TileNotFound(t));
            }
            h[t.0][t.1] -= 1;
        }
        self.concealed = h;
        if meld.type_ == MeldType::Ankan {
            self.ankans.push(meld);
        } else {
            self.melds.push(meld);
        }
        Ok(())
    }

    // 加槓: ポンを明槓に変更
    pub fn apply_kakan(&mut self, t: Tile) -> Result<()> {
        let pos = self
            .melds
            .iter()
            .position(|m| m.type_ == MeldType::Pon && m.tile() == t)
            .ok_or(Error::TileNotFound(t))?;
        self.remove(t)?;
        self.melds[pos] = Meld::new(MeldType::Minkan, vec![t; 4]);
        Ok(())
    }
}

impl FromStr for Hand {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let malformed = || Error::MalformedHand(s.to_string());
        let mut hand = Hand::default();

        // 門前の牌
        let head_len = s.find(['<', '(']).unwrap_or(s.len());
        for t in tiles_from_string(&s[..head_len]).map_err(|_| malformed())? {
            hand.add(t);
        }

        // 副露 <...>, 暗槓 (...)
        let mut rest = &s[head_len..];
        while !rest.is_empty() {
            let close = match rest.chars().next() {
                Some('<') => '>',
                Some('(') => ')',
                _ => return Err(malformed()),
            };
            let end = rest.find(close).ok_or_else(malformed)?;
            let tiles = tiles_from_string(&rest[1..end]).map_err(|_| malformed())?;
            if close == '>' {
                if tiles.len() != 3 && tiles.len() != 4 {
                    return Err(malformed());
                }
                hand.melds.push(Meld::from_open_tiles(tiles)?);
            } else {
                hand.ankans.push(Meld::from_concealed_tiles(tiles)?);
            }
            rest = &rest[end + 1..];
        }

        for t in Tile::all() {
            if hand.count_all(t) > TILE {
                return Err(Error::TooManyCopies(t));
            }
        }
        if hand.len() > 14 {
            return Err(Error::TooManyTiles(hand.len()));
        }

        Ok(hand)
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", tiles_to_string(&self.tiles()))?;
        for m in &self.melds {
            write!(f, "<{}>", m)?;
        }
        for m in &self.ankans {
            write!(f, "({})", m)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hand({})", self)
    }
}

impl ser::Serialize for Hand {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

struct HandVisitor;

impl<'de> de::Visitor<'de> for HandVisitor {
    type Value = Hand;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("hand expression")
    }

    fn visit_str<E>(self, v: &str) -> std::result::Result<Self::Value, E>
    where
        E: de::Error,
    {
        v.parse().map_err(E::custom)
    }
}

impl<'de> de::Deserialize<'de> for Hand {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_str(HandVisitor)
    }
}

#[test]
fn test_hand_parse() {
    let h: Hand = "312m456p789s11z<2z2z2z>".parse().unwrap();
    assert_eq!(h.to_string(), "1m2m3m4p5p6p7s8s9s1z1z<2z2z2z>");
    assert_eq!(h.len(), 14);
    assert_eq!(h.concealed_len(), 11);
    assert_eq!(h.melds()[0].type_, MeldType::Pon);
    assert!(!h.is_closed());

    let h: Hand = "123m11z<5z5z5z5z>(1p1p1p1p)<978s>".parse().unwrap();
    assert_eq!(h.to_string(), "1m2m3m1z1z<5z5z5z5z><7s8s9s>(1p1p1p1p)");
    assert_eq!(h.to_string().parse::<Hand>().unwrap(), h);
    assert_eq!(h.melds()[0].type_, MeldType::Minkan);
    assert_eq!(h.ankans().len(), 1);
    assert_eq!(h.len(), 14);

    let h: Hand = "1m(2z2z2z2z)".parse().unwrap();
    assert!(h.is_closed());
    assert!(h.has_calls());
}

#[test]
fn test_hand_parse_error() {
    for exp in [
        "123m4",
        "123x",
        "8z",
        "123m<12m>",
        "123m<123m4m5m>",
        "123m(1z1z1z)",
        "123m<2z2z2z",
        "123m<2z2z2z>4m",
        "123m[2z2z2z]",
        "123m<1z2z3z>",
    ] {
        match exp.parse::<Hand>() {
            Err(Error::MalformedHand(_)) => {}
            r => panic!("{}: {:?}", exp, r),
        }
    }
    assert_eq!(
        "1111m<1m1m1m>".parse::<Hand>(),
        Err(Error::TooManyCopies(Tile(TM, 1)))
    );
    assert_eq!(
        "123456789m123456p".parse::<Hand>(),
        Err(Error::TooManyTiles(15))
    );
}

#[test]
fn test_hand_add_remove() {
    let mut h: Hand = "159m".parse().unwrap();
    h.add(Tile(TM, 3));
    assert_eq!(h.to_string(), "1m3m5m9m");
    h.remove(Tile(TM, 1)).unwrap();
    assert_eq!(h.to_string(), "3m5m9m");
    assert_eq!(h.remove(Tile(TZ, 1)), Err(Error::TileNotFound(Tile(TZ, 1))));
    assert_eq!(h.to_string(), "3m5m9m");
}

#[test]
fn test_hand_kakan() {
    let mut h: Hand = "23m5z<5z5z5z>".parse().unwrap();
    h.apply_kakan(Tile(TZ, DW)).unwrap();
    assert_eq!(h.to_string(), "2m3m<5z5z5z5z>");
    assert_eq!(h.melds()[0].type_, MeldType::Minkan);
}
