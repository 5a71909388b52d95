use std::str::FromStr;

use serde::{de, ser};

use super::*;
use crate::error::Error;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tile(pub Type, pub Tnum); // (type index, number index)

impl Tile {
    // 0~33の牌種Indexから生成
    pub fn from_index(i: Index) -> Self {
        assert!(i < KIND);
        Self(i / 9, i % 9 + 1)
    }

    // 0~33の牌種Index (萬子, 筒子, 索子, 字牌の順)
    #[inline]
    pub fn to_index(self) -> Index {
        self.0 * 9 + self.1 - 1
    }

    // 全34種の牌
    pub fn all() -> impl Iterator<Item = Tile> {
        (0..KIND).map(Tile::from_index)
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        match self.0 {
            TM | TP | TS => 1 <= self.1 && self.1 <= 9,
            TZ => 1 <= self.1 && self.1 <= DR,
            _ => false,
        }
    }

    // 数牌
    #[inline]
    pub fn is_suit(&self) -> bool {
        self.0 != TZ
    }

    // 字牌
    #[inline]
    pub fn is_honor(&self) -> bool {
        self.0 == TZ
    }

    // 1,9牌
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.0 != TZ && (self.1 == 1 || self.1 == 9)
    }

    // 么九牌
    #[inline]
    pub fn is_end(&self) -> bool {
        self.0 == TZ || self.1 == 1 || self.1 == 9
    }

    // 中張牌
    #[inline]
    pub fn is_simple(&self) -> bool {
        !self.is_end()
    }

    // 風牌
    #[inline]
    pub fn is_wind(&self) -> bool {
        self.0 == TZ && self.1 <= WN
    }

    // 三元牌
    #[inline]
    pub fn is_dragon(&self) -> bool {
        self.0 == TZ && DW <= self.1 && self.1 <= DR
    }

    // ドラ表示牌からドラを返却
    pub fn next_dora(self) -> Self {
        let ni = if self.is_honor() {
            match self.1 {
                WN => WE,
                DR => DW,
                i => i + 1,
            }
        } else {
            match self.1 {
                9 => 1,
                i => i + 1,
            }
        };
        Self(self.0, ni)
    }
}

pub fn tile_type_from_char(c: char) -> Result<Type, Error> {
    Ok(match c {
        'm' => TM,
        'p' => TP,
        's' => TS,
        'z' => TZ,
        _ => return Err(Error::InvalidTile(format!("invalid suit: {}", c))),
    })
}

impl FromStr for Tile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 2 {
            return Err(Error::InvalidTile(s.to_string()));
        }
        let n = chars[0]
            .to_digit(10)
            .ok_or_else(|| Error::InvalidTile(s.to_string()))? as usize;
        let t = Tile(tile_type_from_char(chars[1])?, n);
        if !t.is_valid() {
            return Err(Error::InvalidTile(s.to_string()));
        }
        Ok(t)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.1, ['m', 'p', 's', 'z'][self.0])
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl ser::Serialize for Tile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

struct TileVisitor;

impl<'de> de::Visitor<'de> for TileVisitor {
    type Value = Tile;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("tile symbol")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        v.parse().map_err(E::custom)
    }
}

impl<'de> de::Deserialize<'de> for Tile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_str(TileVisitor)
    }
}

// 牌の並びをパース. "1m2m3m" と "123m" のどちらの表記も可
pub fn tiles_from_string(exp: &str) -> Result<Vec<Tile>, Error> {
    let mut tiles = vec![];
    let mut nums = vec![];
    for c in exp.chars() {
        if let Some(n) = c.to_digit(10) {
            nums.push(n as usize);
            continue;
        }
        if nums.is_empty() {
            return Err(Error::MalformedHand(exp.to_string()));
        }
        let ti = tile_type_from_char(c)?;
        for n in nums.drain(..) {
            let t = Tile(ti, n);
            if !t.is_valid() {
                return Err(Error::InvalidTile(t.to_string()));
            }
            tiles.push(t);
        }
    }
    if !nums.is_empty() {
        return Err(Error::MalformedHand(exp.to_string()));
    }
    Ok(tiles)
}

pub fn tiles_to_string(tiles: &[Tile]) -> String {
    tiles.iter().map(|t| t.to_string()).collect()
}

pub fn tiles_to_tile_table(tiles: &[Tile]) -> TileTable {
    let mut tt = TileTable::default();
    for t in tiles {
        tt[t.0][t.1] += 1;
    }
    tt
}

pub fn tiles_from_tile_table(tt: &TileTable) -> Vec<Tile> {
    let mut tiles = vec![];
    for t in Tile::all() {
        for _ in 0..tt[t.0][t.1] {
            tiles.push(t);
        }
    }
    tiles
}

#[test]
fn test_tile_index() {
    for i in 0..KIND {
        assert_eq!(Tile::from_index(i).to_index(), i);
    }
    assert_eq!(Tile::from_index(0), Tile(TM, 1));
    assert_eq!(Tile::from_index(33), Tile(TZ, DR));
}

#[test]
fn test_tile_parse() {
    assert_eq!("5p".parse::<Tile>().unwrap(), Tile(TP, 5));
    assert_eq!("7z".parse::<Tile>().unwrap().to_string(), "7z");
    assert!("8z".parse::<Tile>().is_err());
    assert!("0m".parse::<Tile>().is_err());
    assert!("1x".parse::<Tile>().is_err());
    assert_eq!(tiles_from_string("19m1z").unwrap().len(), 3);
    assert_eq!(tiles_from_string("1m9m1z").unwrap(), tiles_from_string("19m1z").unwrap());
    assert_eq!(tiles_to_string(&tiles_from_string("19m1z").unwrap()), "1m9m1z");
    assert!(tiles_from_string("19m1").is_err());
    assert!(tiles_from_string("m").is_err());
    assert!(tiles_from_string("18z").is_err());
}

#[test]
fn test_next_dora() {
    let pairs = [
        ("9m", "1m"),
        ("4p", "5p"),
        ("4z", "1z"),
        ("2z", "3z"),
        ("7z", "5z"),
        ("5z", "6z"),
    ];
    for (ind, dora) in pairs {
        let t: Tile = ind.parse().unwrap();
        assert_eq!(t.next_dora().to_string(), dora);
    }
}
