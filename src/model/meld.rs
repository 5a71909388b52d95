use super::*;
use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MeldType {
    Chi,
    Pon,
    Minkan,
    Ankan,
}

// 副露 (暗槓を含む). 牌は常にソート済み
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Meld {
    pub type_: MeldType,
    pub tiles: Vec<Tile>,
}

impl Meld {
    pub fn new(type_: MeldType, mut tiles: Vec<Tile>) -> Self {
        tiles.sort();
        Self { type_, tiles }
    }

    // 鳴きの牌の並びから副露の種別を判定
    // 3枚: 順子ならチー, 刻子ならポン. 4枚: 同一牌のみ
    pub fn from_open_tiles(tiles: Vec<Tile>) -> Result<Self, Error> {
        let m = Self::new(MeldType::Chi, tiles);
        let t = &m.tiles;
        let type_ = match t.len() {
            3 if t[0] == t[1] && t[1] == t[2] => MeldType::Pon,
            3 if t[0].is_suit()
                && t[0].0 == t[2].0
                && t[1] == Tile(t[0].0, t[0].1 + 1)
                && t[2] == Tile(t[0].0, t[0].1 + 2) =>
            {
                MeldType::Chi
            }
            4 if t.iter().all(|x| *x == t[0]) => MeldType::Minkan,
            _ => return Err(Error::MalformedHand(format!("invalid meld: <{}>", m))),
        };
        Ok(Self { type_, ..m })
    }

    pub fn from_concealed_tiles(tiles: Vec<Tile>) -> Result<Self, Error> {
        let m = Self::new(MeldType::Ankan, tiles);
        if m.tiles.len() != 4 || m.tiles.iter().any(|x| *x != m.tiles[0]) {
            return Err(Error::MalformedHand(format!("invalid ankan: ({})", m)));
        }
        Ok(m)
    }

    // 順子の場合は先頭の牌, 刻子・槓子の場合はその牌
    #[inline]
    pub fn tile(&self) -> Tile {
        self.tiles[0]
    }
}

impl fmt::Display for Meld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", tiles_to_string(&self.tiles))
    }
}

#[test]
fn test_meld_type() {
    let chi = Meld::from_open_tiles(tiles_from_string("867s").unwrap()).unwrap();
    assert_eq!(chi.type_, MeldType::Chi);
    assert_eq!(chi.to_string(), "6s7s8s");
    assert_eq!(chi.tile(), Tile(TS, 6));

    let pon = Meld::from_open_tiles(tiles_from_string("5z5z5z").unwrap()).unwrap();
    assert_eq!(pon.type_, MeldType::Pon);

    let kan = Meld::from_open_tiles(tiles_from_string("1p1p1p1p").unwrap()).unwrap();
    assert_eq!(kan.type_, MeldType::Minkan);

    assert!(Meld::from_open_tiles(tiles_from_string("1z2z3z").unwrap()).is_err());
    assert!(Meld::from_open_tiles(tiles_from_string("89m1p").unwrap()).is_err());
    assert!(Meld::from_open_tiles(tiles_from_string("135m").unwrap()).is_err());
    assert!(Meld::from_concealed_tiles(tiles_from_string("1m1m1m").unwrap()).is_err());
}
