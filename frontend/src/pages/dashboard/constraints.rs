use once_cell::sync::Lazy;
use regex::Regex;
use shared::validation::{ConstraintTable, FieldConstraints};

static MAP_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9_]+$").unwrap());

const COORDINATE_LIMIT: f64 = 100_000.0;

pub fn teleport_constraints() -> ConstraintTable {
    let coordinate = FieldConstraints::new()
        .required()
        .min(-COORDINATE_LIMIT)
        .max(COORDINATE_LIMIT);

    let mut table = ConstraintTable::new();
    table.insert("name", FieldConstraints::new().required().min_length(3).max_length(32));
    table.insert("map_id", FieldConstraints::new().required().max_length(32).pattern(MAP_ID.clone()));
    table.insert("x", coordinate.clone());
    table.insert("y", coordinate.clone());
    table.insert("z", coordinate);
    table.insert("preview_url", FieldConstraints::new().max_length(255).url());
    table
}

pub fn advertising_constraints() -> ConstraintTable {
    let mut table = ConstraintTable::new();
    table.insert("realm_name", FieldConstraints::new().required().min_length(3).max_length(48));
    table.insert("website", FieldConstraints::new().required().max_length(255).url());
    table.insert("discord", FieldConstraints::new().max_length(255).url());
    table.insert("description", FieldConstraints::new().max_length(500));
    table.insert("rate_multiplier", FieldConstraints::new().required().min(1.0).max(1000.0));
    table
}
