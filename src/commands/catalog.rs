//! Cosmetic catalogs: pack prices and rarity rating ranges.
//!
//! Display data only. Purchasing and opening packs is gameplay and lives
//! outside this crate; nothing here touches an account.

/// Credit-priced packs, in display order.
pub const PACK_PRICES: [(&str, u64); 5] = [
    ("regular", 50),
    ("rare", 200),
    ("lucky", 1500),
    ("master", 5500),
    ("legend", 15500),
];

/// Sand-Grain-Credit-priced packs, in display order.
pub const PACK_SGC_PRICES: [(&str, u64); 3] = [
    ("ultimate", 10),
    ("sand", 25),
    ("special", 50),
];

/// Rarity tiers as (min_rating, max_rating), weakest first.
pub const CARD_RARITIES: [(&str, (u32, u32)); 7] = [
    ("common", (50, 70)),
    ("uncommon", (65, 80)),
    ("rare", (75, 85)),
    ("epic", (80, 90)),
    ("legendary", (85, 95)),
    ("mythic", (90, 100)),
    ("dev", (95, 105)),
];

/// Rating range for a rarity tier name, if it exists.
pub fn rarity_range(name: &str) -> Option<(u32, u32)> {
    CARD_RARITIES
        .iter()
        .find(|(tier, _)| *tier == name)
        .map(|(_, range)| *range)
}
