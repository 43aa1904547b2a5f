//! Kiosk Models
//!
//! Data structures matching the backend JSON, plus the small pieces of
//! page logic that operate on them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::deletion::Keyed;

/// Number of bottle positions on the machine.
pub const BOTTLE_SLOTS: usize = 12;

/// Video shown for drinks without their own clip.
pub const IDLE_VIDEO: &str = "/idle.mp4";

const IMAGE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".webp", ".svg", ".gif"];

// ========================
// Recipes
// ========================

/// Per-slot volumes in millilitres, serialized as `bottle_1` .. `bottle_12`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BottleVolumes {
    #[serde(default)]
    pub bottle_1: f64,
    #[serde(default)]
    pub bottle_2: f64,
    #[serde(default)]
    pub bottle_3: f64,
    #[serde(default)]
    pub bottle_4: f64,
    #[serde(default)]
    pub bottle_5: f64,
    #[serde(default)]
    pub bottle_6: f64,
    #[serde(default)]
    pub bottle_7: f64,
    #[serde(default)]
    pub bottle_8: f64,
    #[serde(default)]
    pub bottle_9: f64,
    #[serde(default)]
    pub bottle_10: f64,
    #[serde(default)]
    pub bottle_11: f64,
    #[serde(default)]
    pub bottle_12: f64,
}

impl BottleVolumes {
    pub fn to_array(&self) -> [f64; BOTTLE_SLOTS] {
        [
            self.bottle_1, self.bottle_2, self.bottle_3, self.bottle_4,
            self.bottle_5, self.bottle_6, self.bottle_7, self.bottle_8,
            self.bottle_9, self.bottle_10, self.bottle_11, self.bottle_12,
        ]
    }

    /// Volume for a 1-based slot; out-of-range slots read as empty.
    pub fn get(&self, slot: usize) -> f64 {
        slot.checked_sub(1)
            .and_then(|i| self.to_array().get(i).copied())
            .unwrap_or(0.0)
    }

    /// Set the volume for a 1-based slot. Out-of-range slots are ignored.
    pub fn set(&mut self, slot: usize, ml: f64) {
        let target = match slot {
            1 => &mut self.bottle_1,
            2 => &mut self.bottle_2,
            3 => &mut self.bottle_3,
            4 => &mut self.bottle_4,
            5 => &mut self.bottle_5,
            6 => &mut self.bottle_6,
            7 => &mut self.bottle_7,
            8 => &mut self.bottle_8,
            9 => &mut self.bottle_9,
            10 => &mut self.bottle_10,
            11 => &mut self.bottle_11,
            12 => &mut self.bottle_12,
            _ => return,
        };
        *target = ml;
    }

    pub fn any_used(&self) -> bool {
        self.to_array().iter().any(|ml| *ml > 0.0)
    }

    /// `(slot, ml)` for every slot with a positive volume.
    pub fn used(&self) -> Vec<(usize, f64)> {
        self.to_array()
            .iter()
            .enumerate()
            .filter(|(_, ml)| **ml > 0.0)
            .map(|(i, ml)| (i + 1, *ml))
            .collect()
    }
}

/// Drink recipe as served by `/recipes/`.
///
/// Fields the kiosk does not know about are kept in `extra` so that a
/// recipe written back to the backend is unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default)]
    pub recipe_name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(flatten)]
    pub volumes: BottleVolumes,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Problems that block saving a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RecipeIssue {
    #[error("Recipe name is required")]
    MissingName,
    #[error("At least one bottle must have ml > 0")]
    NoBottles,
    #[error("Price must be >= 0")]
    NegativePrice,
}

impl Recipe {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            recipe_name: name.into(),
            price,
            ..Default::default()
        }
    }

    /// Blank recipe for the "Add Recipe" form.
    pub fn draft() -> Self {
        Self {
            price: 10.0,
            video_url: Some(String::new()),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Vec<RecipeIssue> {
        let mut issues = Vec::new();
        if self.recipe_name.trim().is_empty() {
            issues.push(RecipeIssue::MissingName);
        }
        if !self.volumes.any_used() {
            issues.push(RecipeIssue::NoBottles);
        }
        if self.price < 0.0 {
            issues.push(RecipeIssue::NegativePrice);
        }
        issues
    }

    /// Short "30ml, 20ml" summary of the first two used bottles.
    pub fn volume_summary(&self) -> String {
        self.volumes
            .used()
            .iter()
            .take(2)
            .map(|(_, ml)| format!("{ml}ml"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Split image and video media the way the product browser shows them.
    ///
    /// Some installs store an image in `video_url`; that becomes the image.
    /// Drinks without a clip play the idle video.
    pub fn with_normalized_media(mut self) -> Self {
        let video = self.video_url.take().unwrap_or_default();
        let image_in_video = looks_like_image(&video);
        let explicit_image = self.image_url.take().filter(|url| !url.is_empty());

        self.image_url = explicit_image.or_else(|| image_in_video.then(|| video.clone()));
        self.video_url = Some(if !image_in_video && !video.is_empty() {
            video
        } else {
            IDLE_VIDEO.to_string()
        });
        self
    }

    pub fn display_price(&self) -> String {
        format!("₹{}", self.price)
    }
}

impl Keyed for Recipe {
    type Key = String;

    fn key(&self) -> String {
        self.recipe_name.clone()
    }
}

/// True when a URL points at a still image (by extension, query ignored).
pub fn looks_like_image(url: &str) -> bool {
    let path = url.split('?').next().unwrap_or_default().to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Menu shown while the backend cannot be reached.
pub fn fallback_menu() -> Vec<Recipe> {
    [("Electric Citrus", 180.0), ("Velvet Mocha", 220.0), ("Berry Breeze", 160.0)]
        .into_iter()
        .map(|(name, price)| Recipe {
            video_url: Some(IDLE_VIDEO.to_string()),
            ..Recipe::new(name, price)
        })
        .collect()
}

/// Normalize a freshly fetched menu, dropping nameless rows.
pub fn prepare_menu(recipes: Vec<Recipe>) -> Vec<Recipe> {
    recipes
        .into_iter()
        .filter(|r| !r.recipe_name.trim().is_empty())
        .map(Recipe::with_normalized_media)
        .collect()
}

// ========================
// Machine Inventory
// ========================

/// Bottle slot assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bottle {
    pub bottle_number: u32,
    #[serde(default)]
    pub liquid_name: String,
}

/// Slots whose liquid changed between two snapshots of the bottle list.
pub fn changed_bottles<'a>(before: &[Bottle], after: &'a [Bottle]) -> Vec<&'a Bottle> {
    after
        .iter()
        .filter(|b| {
            before
                .iter()
                .find(|old| old.bottle_number == b.bottle_number)
                .map_or(true, |old| old.liquid_name != b.liquid_name)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_cold: bool,
}

/// Body for creating or updating an ingredient.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientInput {
    pub name: String,
    pub is_cold: bool,
}

impl IngredientInput {
    /// Trimmed input, or `None` when the name is blank.
    pub fn new(name: &str, is_cold: bool) -> Option<Self> {
        let name = name.trim();
        (!name.is_empty()).then(|| Self {
            name: name.to_string(),
            is_cold,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    pub machine_id: String,
    #[serde(default)]
    pub label: Option<String>,
}

impl Machine {
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.machine_id)
    }
}

/// Machine reference on a sale: either a bare id or the full object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MachineRef {
    Id(String),
    Machine(Machine),
}

impl MachineRef {
    pub fn machine_id(&self) -> &str {
        match self {
            MachineRef::Id(id) => id,
            MachineRef::Machine(machine) => &machine.machine_id,
        }
    }
}

// ========================
// Sales
// ========================

/// One recorded sale, as listed by `/dailycounts/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyCount {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub recipe: Option<String>,
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub machine: Option<MachineRef>,
}

/// Totals shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SalesSummary {
    pub count: usize,
    pub revenue: f64,
}

impl SalesSummary {
    pub fn of(sales: &[DailyCount]) -> Self {
        Self {
            count: sales.len(),
            revenue: sales.iter().map(|s| s.amount).sum(),
        }
    }
}

/// Sales table filters. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalesFilter {
    /// Exact recipe name
    pub recipe: String,
    /// Exact machine id
    pub machine: String,
    /// Case-insensitive substring of the customer name
    pub customer: String,
}

impl SalesFilter {
    pub fn matches(&self, sale: &DailyCount) -> bool {
        if !self.recipe.is_empty() && sale.recipe.as_deref() != Some(self.recipe.as_str()) {
            return false;
        }
        if !self.machine.is_empty() {
            let machine_id = sale.machine.as_ref().map(MachineRef::machine_id).unwrap_or("");
            if machine_id != self.machine {
                return false;
            }
        }
        if !self.customer.is_empty() {
            let customer = sale.customer.as_deref().unwrap_or("").to_lowercase();
            if !customer.contains(&self.customer.to_lowercase()) {
                return false;
            }
        }
        true
    }

    pub fn apply<'a>(&self, sales: &'a [DailyCount]) -> Vec<&'a DailyCount> {
        sales.iter().filter(|s| self.matches(s)).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Cash,
    Mobile,
    Wallet,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Card,
        PaymentMethod::Cash,
        PaymentMethod::Mobile,
        PaymentMethod::Wallet,
    ];

    pub fn id(self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Cash => "cash",
            PaymentMethod::Mobile => "mobile",
            PaymentMethod::Wallet => "wallet",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Card => "Card",
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Mobile => "Mobile Pay",
            PaymentMethod::Wallet => "Wallet",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            PaymentMethod::Card => "💳",
            PaymentMethod::Cash => "💵",
            PaymentMethod::Mobile => "📱",
            PaymentMethod::Wallet => "👛",
        }
    }
}

/// Body for `/record_sale/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleRecord {
    pub recipe_name: String,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
}

impl SaleRecord {
    pub fn new(recipe: &Recipe, method: PaymentMethod, customer: Option<&SessionUser>) -> Self {
        Self {
            recipe_name: recipe.recipe_name.clone(),
            amount: recipe.price,
            payment_method: method,
            customer: customer.and_then(SessionUser::display_name).map(str::to_string),
        }
    }
}

// ========================
// Accounts
// ========================

/// Logged-in user as returned by the auth endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionUser {
    pub fn is_owner(&self) -> bool {
        matches!(self.role.as_deref(), Some("owner") | Some("admin"))
    }

    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().or(self.email.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn recipe_keeps_unknown_fields() {
        let raw = json!({
            "recipe_name": "Mojito",
            "price": 180,
            "bottle_3": 40,
            "ingredients": ["mint", "lime"]
        });
        let recipe: Recipe = serde_json::from_value(raw).unwrap();
        assert_eq!(recipe.volumes.get(3), 40.0);
        assert_eq!(recipe.extra.get("ingredients"), Some(&json!(["mint", "lime"])));
        assert!(!recipe.extra.contains_key("bottle_3"));

        let back = serde_json::to_value(&recipe).unwrap();
        assert_eq!(back["ingredients"], json!(["mint", "lime"]));
        assert_eq!(back["bottle_3"], json!(40.0));
    }

    #[test]
    fn validation_collects_every_issue() {
        let mut recipe = Recipe::draft();
        recipe.price = -1.0;
        assert_eq!(
            recipe.validate(),
            vec![RecipeIssue::MissingName, RecipeIssue::NoBottles, RecipeIssue::NegativePrice]
        );

        recipe.recipe_name = "Mojito".into();
        recipe.price = 0.0;
        recipe.volumes.set(1, 30.0);
        assert!(recipe.validate().is_empty());
    }

    #[test]
    fn volume_summary_lists_first_two_bottles() {
        let mut recipe = Recipe::new("Citrus", 150.0);
        recipe.volumes.set(2, 30.0);
        recipe.volumes.set(5, 20.0);
        recipe.volumes.set(9, 10.0);
        assert_eq!(recipe.volume_summary(), "30ml, 20ml");
    }

    #[test]
    fn image_in_video_field_moves_to_image() {
        let recipe = Recipe {
            video_url: Some("https://cdn.example/mojito.JPG?v=2".into()),
            ..Recipe::new("Mojito", 180.0)
        }
        .with_normalized_media();
        assert_eq!(recipe.image_url.as_deref(), Some("https://cdn.example/mojito.JPG?v=2"));
        assert_eq!(recipe.video_url.as_deref(), Some(IDLE_VIDEO));
    }

    #[test]
    fn real_video_is_kept_and_missing_video_falls_back() {
        let clip = Recipe {
            video_url: Some("/clips/mojito.mp4".into()),
            ..Recipe::new("Mojito", 180.0)
        }
        .with_normalized_media();
        assert_eq!(clip.video_url.as_deref(), Some("/clips/mojito.mp4"));
        assert_eq!(clip.image_url, None);

        let bare = Recipe::new("Citrus", 150.0).with_normalized_media();
        assert_eq!(bare.video_url.as_deref(), Some(IDLE_VIDEO));
    }

    #[test]
    fn prepare_menu_drops_nameless_rows() {
        let menu = prepare_menu(vec![Recipe::new("", 10.0), Recipe::new("Mojito", 180.0)]);
        assert_eq!(menu.len(), 1);
        assert_eq!(menu[0].recipe_name, "Mojito");
    }

    #[test]
    fn only_changed_bottles_are_reported() {
        let before = vec![
            Bottle { bottle_number: 1, liquid_name: "Rum".into() },
            Bottle { bottle_number: 2, liquid_name: "Lime".into() },
        ];
        let mut after = before.clone();
        after[1].liquid_name = "Mango juice".into();

        let changed = changed_bottles(&before, &after);
        assert_eq!(changed.len(), 1);
        assert_eq!(changed[0].bottle_number, 2);
    }

    #[test]
    fn sales_filter_handles_both_machine_shapes() {
        let sales: Vec<DailyCount> = serde_json::from_value(json!([
            {"timestamp": "2026-10-19T10:00:00Z", "recipe": "Mojito", "customer": "Asha Rao", "amount": 180, "machine": "M-1"},
            {"timestamp": "2026-10-19T11:00:00Z", "recipe": "Citrus", "customer": null, "amount": 150,
             "machine": {"machine_id": "M-2", "label": "Lobby"}}
        ]))
        .unwrap();

        let by_machine = SalesFilter { machine: "M-2".into(), ..Default::default() };
        assert_eq!(by_machine.apply(&sales).len(), 1);

        let by_customer = SalesFilter { customer: "asha".into(), ..Default::default() };
        let hits = by_customer.apply(&sales);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].recipe.as_deref(), Some("Mojito"));

        assert_eq!(SalesFilter::default().apply(&sales).len(), 2);
        assert_eq!(SalesSummary::of(&sales).revenue, 330.0);
    }

    #[test]
    fn owner_role_detection() {
        let owner: SessionUser = serde_json::from_value(json!({"role": "owner", "name": "Ravi"})).unwrap();
        let customer: SessionUser = serde_json::from_value(json!({"email": "c@example.com"})).unwrap();
        assert!(owner.is_owner());
        assert!(!customer.is_owner());
        assert_eq!(customer.display_name(), Some("c@example.com"));
    }

    #[test]
    fn ingredient_input_requires_a_name() {
        assert_eq!(IngredientInput::new("   ", true), None);
        assert_eq!(
            IngredientInput::new(" Ice ", true),
            Some(IngredientInput { name: "Ice".into(), is_cold: true })
        );
    }

    #[test]
    fn sale_record_serializes_method_in_lowercase() {
        let sale = SaleRecord::new(&Recipe::new("Mojito", 180.0), PaymentMethod::Mobile, None);
        let body = serde_json::to_value(&sale).unwrap();
        assert_eq!(body, json!({"recipe_name": "Mojito", "amount": 180.0, "payment_method": "mobile"}));
    }
}
