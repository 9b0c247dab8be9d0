use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// 資料ID - カタログ管理コンテキストの集約ID
///
/// ストアが採番する。登録前の資料はIDを持たない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 分類（閉じた集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// 小説・物語
    Fiction,
    /// ノンフィクション
    NonFiction,
}

impl Category {
    /// 永続化用の文字列表現
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Fiction => "fiction",
            Category::NonFiction => "non_fiction",
        }
    }

    /// 表示用の名称
    pub fn label(&self) -> &'static str {
        match self {
            Category::Fiction => "Fiction",
            Category::NonFiction => "Non-Fiction",
        }
    }
}

/// 大文字小文字・区切り文字の違いを吸収して解釈する。
///
/// "non-fiction" のように "fiction" を部分文字列として含む入力があるため、
/// ノンフィクション側を先に判定する。
impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();

        match normalized.as_str() {
            "nonfiction" => Ok(Category::NonFiction),
            "fiction" => Ok(Category::Fiction),
            _ => Err(format!("Invalid category: {}", s)),
        }
    }
}

/// 媒体（閉じた集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Medium {
    /// 紙の書籍
    Physical,
    /// 電子書籍
    Digital,
}

impl Medium {
    pub fn as_str(&self) -> &'static str {
        match self {
            Medium::Physical => "physical",
            Medium::Digital => "digital",
        }
    }
}

impl std::str::FromStr for Medium {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "physical" => Ok(Medium::Physical),
            "digital" => Ok(Medium::Digital),
            _ => Err(format!("Invalid medium: {}", s)),
        }
    }
}

/// 貸出可否の状態
///
/// 初期状態はAvailable。終端状態はない（両状態とも再遷移可能）。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Availability {
    /// 貸出可能
    #[default]
    Available,
    /// 貸出中
    Loaned,
}

impl Availability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Available => "available",
            Availability::Loaned => "loaned",
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available)
    }

    pub fn is_loaned(&self) -> bool {
        matches!(self, Availability::Loaned)
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Availability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Availability::Available),
            "loaned" => Ok(Availability::Loaned),
            _ => Err(format!("Invalid availability: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id_creation() {
        let id1 = ItemId::new();
        let id2 = ItemId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_item_id_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = ItemId::from_uuid(uuid);
        assert_eq!(id.value(), uuid);
    }

    #[test]
    fn test_availability_defaults_to_available() {
        assert_eq!(Availability::default(), Availability::Available);
    }

    #[test]
    fn test_availability_round_trips_through_str() {
        for state in [Availability::Available, Availability::Loaned] {
            assert_eq!(state.as_str().parse::<Availability>(), Ok(state));
        }
        assert!("borrowed".parse::<Availability>().is_err());
    }

    // "non-fiction" は "fiction" を含むため、判定順序が重要
    #[test]
    fn test_category_parses_non_fiction_before_fiction() {
        assert_eq!("Non-Fiction".parse::<Category>(), Ok(Category::NonFiction));
        assert_eq!("non fiction".parse::<Category>(), Ok(Category::NonFiction));
        assert_eq!("non_fiction".parse::<Category>(), Ok(Category::NonFiction));
        assert_eq!(" FICTION ".parse::<Category>(), Ok(Category::Fiction));
    }

    #[test]
    fn test_category_rejects_unknown_values() {
        assert!("poetry".parse::<Category>().is_err());
        assert!("".parse::<Category>().is_err());
    }

    #[test]
    fn test_medium_parse() {
        assert_eq!("Digital".parse::<Medium>(), Ok(Medium::Digital));
        assert_eq!("physical".parse::<Medium>(), Ok(Medium::Physical));
        assert!("audio".parse::<Medium>().is_err());
    }
}
