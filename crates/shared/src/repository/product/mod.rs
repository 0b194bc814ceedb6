pub mod command;
pub mod query;

pub(crate) const PRODUCT_SELECT: &str = r#"
    SELECT
        p.id,
        p.name,
        p.size_kg,
        p.price,
        p.is_active,
        COALESCE(s.units_available, 0) AS units_available,
        p.created_at,
        p.updated_at
    FROM products p
    LEFT JOIN stock s ON s.product_id = p.id
"#;
