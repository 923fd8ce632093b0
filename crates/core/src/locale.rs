//! Locales, user-facing message lookup, and the persisted language
//! preference.
//!
//! The active locale lives in a [`Translator`] value that callers pass
//! around explicitly. Reading and writing the preference goes through a
//! [`PreferenceStore`], so persistence is a visible side effect.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Preference key holding the language code.
pub const LANGUAGE_KEY: &str = "language";

// ---------------------------------------------------------------------------
// Locale
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    En,
    Ar,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ar => "ar",
        }
    }

    pub fn is_rtl(&self) -> bool {
        matches!(self, Self::Ar)
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "en" => Some(Self::En),
            "ar" => Some(Self::Ar),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::En => Self::Ar,
            Self::Ar => Self::En,
        }
    }
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// Every user-facing message the client emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    EmptyItemList,
    SelectProduct,
    QuantityMustBePositive,
    MissingDimensions,
    InvalidInput,
    GenericError,
    LayoutGenerated,
    SubmitBlocked,
    CapacityOk,
    CapacityExceeded,
    StockUpdated,
    StockPlaced,
    PlacementFailed,
    DoorSaved,
    LanguageChanged,
}

impl MessageKey {
    fn english(self) -> &'static str {
        match self {
            Self::EmptyItemList => "Add at least one product with a positive quantity",
            Self::SelectProduct => "Please select a product",
            Self::QuantityMustBePositive => "Quantity must be greater than zero",
            Self::MissingDimensions => "This product has no dimensions",
            Self::InvalidInput => "Please check the highlighted fields",
            Self::GenericError => "Something went wrong. Please try again",
            Self::LayoutGenerated => "Layout generated successfully",
            Self::SubmitBlocked => "The current items do not fit this room",
            Self::CapacityOk => "Items fit in the room",
            Self::CapacityExceeded => "Items exceed the room capacity",
            Self::StockUpdated => "Stock updated",
            Self::StockPlaced => "Stock placed in room",
            Self::PlacementFailed => "Stock was updated but could not be placed in the room",
            Self::DoorSaved => "Door saved",
            Self::LanguageChanged => "Language changed to English",
        }
    }

    fn arabic(self) -> &'static str {
        match self {
            Self::EmptyItemList => "أضف منتجًا واحدًا على الأقل بكمية موجبة",
            Self::SelectProduct => "يرجى اختيار منتج",
            Self::QuantityMustBePositive => "يجب أن تكون الكمية أكبر من صفر",
            Self::MissingDimensions => "لا توجد أبعاد لهذا المنتج",
            Self::InvalidInput => "يرجى التحقق من الحقول المحددة",
            Self::GenericError => "حدث خطأ ما. يرجى المحاولة مرة أخرى",
            Self::LayoutGenerated => "تم إنشاء التخطيط بنجاح",
            Self::SubmitBlocked => "العناصر الحالية لا تتسع في هذه الغرفة",
            Self::CapacityOk => "العناصر تتسع في الغرفة",
            Self::CapacityExceeded => "العناصر تتجاوز سعة الغرفة",
            Self::StockUpdated => "تم تحديث المخزون",
            Self::StockPlaced => "تم وضع المخزون في الغرفة",
            Self::PlacementFailed => "تم تحديث المخزون لكن تعذر وضعه في الغرفة",
            Self::DoorSaved => "تم حفظ الباب",
            Self::LanguageChanged => "تم تغيير اللغة إلى العربية",
        }
    }
}

/// Typed message lookup for the active locale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Translator {
    locale: Locale,
}

impl Translator {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// Build a translator from the persisted preference.
    pub fn load(store: &dyn PreferenceStore) -> Result<Self, CoreError> {
        Ok(Self::new(load_locale(store)?))
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn translate(&self, key: MessageKey) -> &'static str {
        match self.locale {
            Locale::En => key.english(),
            Locale::Ar => key.arabic(),
        }
    }

    /// Switch locale and persist the choice.
    pub fn set_locale(
        &mut self,
        locale: Locale,
        store: &mut dyn PreferenceStore,
    ) -> Result<(), CoreError> {
        save_locale(store, locale)?;
        self.locale = locale;
        Ok(())
    }

    /// Flip between the supported locales and persist the choice.
    pub fn toggle(&mut self, store: &mut dyn PreferenceStore) -> Result<Locale, CoreError> {
        let next = self.locale.toggled();
        self.set_locale(next, store)?;
        Ok(next)
    }
}

// ---------------------------------------------------------------------------
// Preference storage
// ---------------------------------------------------------------------------

/// String key-value store for user preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError>;
}

/// Read the saved locale; missing or unknown values fall back to English.
pub fn load_locale(store: &dyn PreferenceStore) -> Result<Locale, CoreError> {
    let saved = store.get(LANGUAGE_KEY)?;
    Ok(saved
        .as_deref()
        .and_then(Locale::from_code)
        .unwrap_or_default())
}

pub fn save_locale(store: &mut dyn PreferenceStore, locale: Locale) -> Result<(), CoreError> {
    store.set(LANGUAGE_KEY, locale.code())
}

/// Process-local store, used in tests and when no file is configured.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences kept as a flat JSON object in a file.
///
/// The file is read on every access; a missing file is an empty store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<HashMap<String, String>, CoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => {
                return Err(CoreError::Storage(format!(
                    "Failed to read {}: {e}",
                    self.path.display()
                )))
            }
        };
        if raw.trim().is_empty() {
            return Ok(HashMap::new());
        }
        serde_json::from_str(&raw).map_err(|e| {
            CoreError::Storage(format!("Malformed preferences in {}: {e}", self.path.display()))
        })
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        let json = serde_json::to_string_pretty(&values)
            .map_err(|e| CoreError::Storage(e.to_string()))?;
        std::fs::write(&self.path, json).map_err(|e| {
            CoreError::Storage(format!("Failed to write {}: {e}", self.path.display()))
        })?;
        tracing::debug!(key, value, path = %self.path.display(), "Preference saved");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
