//! 旧システムの蔵書レコードの取り込み
//!
//! 旧レコードは分類・形式を自由記述（スペイン語）で持ち、貸出中フラグで状態を表す。
//! 既知の語彙を閉じた集合へ写像し、未知・未設定の値はFiction / Physicalとして扱う。

use serde::{Deserialize, Serialize};

use super::{Availability, Category, ItemDraft, Medium};

const FICTION_TERMS: [&str; 5] = ["ficcion", "novela", "cuento", "fantasia", "ciencia ficcion"];
const NON_FICTION_TERMS: [&str; 6] = ["no ficcion", "ensayo", "biografia", "historia", "ciencia", "tecnico"];
const DIGITAL_TERMS: [&str; 5] = ["digital", "ebook", "pdf", "epub", "electronico"];
const PHYSICAL_TERMS: [&str; 5] = ["fisico", "papel", "impreso", "tapa dura", "tapa blanda"];

/// 旧システムの蔵書レコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyItemRecord {
    pub name: String,
    pub writer: String,
    pub category: Option<String>,
    pub format: Option<String>,
    pub on_loan: bool,
}

impl LegacyItemRecord {
    /// 貸出可能なレコードを作る
    pub fn new(
        name: impl Into<String>,
        writer: impl Into<String>,
        category: impl Into<String>,
        format: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            writer: writer.into(),
            category: Some(category.into()),
            format: Some(format.into()),
            on_loan: false,
        }
    }

    pub fn category(&self) -> Category {
        match self.category.as_deref().map(normalize) {
            Some(term) if NON_FICTION_TERMS.contains(&term.as_str()) => Category::NonFiction,
            Some(term) if FICTION_TERMS.contains(&term.as_str()) => Category::Fiction,
            _ => Category::Fiction,
        }
    }

    pub fn medium(&self) -> Medium {
        match self.format.as_deref().map(normalize) {
            Some(term) if DIGITAL_TERMS.contains(&term.as_str()) => Medium::Digital,
            Some(term) if PHYSICAL_TERMS.contains(&term.as_str()) => Medium::Physical,
            _ => Medium::Physical,
        }
    }

    pub fn availability(&self) -> Availability {
        if self.on_loan {
            Availability::Loaned
        } else {
            Availability::Available
        }
    }

    /// 登録候補へ変換する
    ///
    /// 登録は常にAvailableで行うため、貸出中フラグは候補に含めない。
    /// 貸出中のレコードは登録後に貸出遷移を適用すること。
    pub fn to_draft(&self) -> ItemDraft {
        ItemDraft::new(
            self.name.clone(),
            self.writer.clone(),
            self.category(),
            self.medium(),
        )
    }
}

/// 小文字化・前後空白除去・アクセント除去
fn normalize(term: &str) -> String {
    term.trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'ä' => 'a',
            'é' | 'è' | 'ë' => 'e',
            'í' | 'ì' | 'ï' => 'i',
            'ó' | 'ò' | 'ö' => 'o',
            'ú' | 'ù' | 'ü' => 'u',
            other => other,
        })
        .collect()
}
