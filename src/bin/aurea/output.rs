//! Plain text output for catalog queries.

use std::io;

use aurea::{
    catalog::{Provenance, SourceInfo},
    products::Product,
    render,
};
use rust_decimal::Decimal;
use tabled::{
    builder::Builder,
    settings::{Alignment, Color, Style, object::Columns, object::Rows},
};

/// Write products as a table.
pub fn write_products(out: &mut impl io::Write, products: &[&Product]) -> io::Result<()> {
    if products.is_empty() {
        return writeln!(out, "No products found");
    }

    let mut builder = Builder::default();

    builder.push_record(["Id", "Name", "Category", "Price", "Rating", "Stock"]);

    for product in products {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            product.category.clone(),
            product.price.to_string(),
            product.rating.to_string(),
            product.stock.to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..6), Alignment::right());

    writeln!(out, "{table}")
}

/// Write a product's detail view as text.
pub fn write_product(out: &mut impl io::Write, product: &Product) -> io::Result<()> {
    writeln!(out, "{}", product.name)?;
    writeln!(out, "{}  {}", product.price, product.category)?;
    writeln!(
        out,
        "{} {} ({} reviews)",
        text_stars(product.rating),
        product.rating,
        product.reviews
    )?;

    if !product.long_description.is_empty() {
        writeln!(out, "\n{}", product.long_description)?;
    }

    for feature in &product.features {
        writeln!(out, "  - {feature}")?;
    }

    if !product.sizes.is_empty() {
        writeln!(out, "Sizes:  {}", product.sizes.join(", "))?;
    }

    if !product.colors.is_empty() {
        writeln!(out, "Colors: {}", product.colors.join(", "))?;
    }

    if product.in_stock() {
        writeln!(out, "In Stock ({} available)", product.stock)
    } else {
        writeln!(out, "Out of Stock (0 available)")
    }
}

/// Five star glyphs for a rating, the plain text counterpart of
/// [`render::star_rating`].
fn text_stars(rating: Decimal) -> String {
    let (full, half, empty) = render::star_counts(rating);

    format!("{}{}{}", "★".repeat(full), "½".repeat(half), "☆".repeat(empty))
}

/// Write the catalog's loading state.
pub fn write_source(
    out: &mut impl io::Write,
    info: SourceInfo,
    origin: Option<&str>,
    rejection: Option<&str>,
) -> io::Result<()> {
    let source = match info.source {
        Some(Provenance::External) => "external dataset",
        Some(Provenance::Fallback) => "sample products",
        None => "not loaded",
    };

    writeln!(out, "Source:   {source}")?;

    if let Some(origin) = origin {
        writeln!(out, "Origin:   {origin}")?;
    }

    if let Some(rejection) = rejection {
        writeln!(out, "Rejected: {rejection}")?;
    }

    writeln!(out, "Products: {}", info.product_count)
}

#[cfg(test)]
mod tests {
    use aurea::catalog::CatalogStore;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn product_table_lists_sample_products() -> TestResult {
        let catalog = CatalogStore::default();
        let products: Vec<&Product> = catalog.all().iter().collect();
        let mut out = Vec::new();

        write_products(&mut out, &products)?;

        let output = String::from_utf8(out)?;
        assert!(output.contains("Pearl Whisper Flats"));
        assert!(output.contains("Rp 379.000"));

        Ok(())
    }

    #[test]
    fn empty_listing_says_so() -> TestResult {
        let mut out = Vec::new();

        write_products(&mut out, &[])?;

        assert_eq!(String::from_utf8(out)?, "No products found\n");

        Ok(())
    }

    #[test]
    fn text_stars_follow_rating() {
        assert_eq!(text_stars(Decimal::new(48, 1)), "★★★★½");
        assert_eq!(text_stars(Decimal::new(4, 0)), "★★★★☆");
        assert_eq!(text_stars(Decimal::ZERO), "☆☆☆☆☆");
    }

    #[test]
    fn product_text_includes_stock_line() -> TestResult {
        let catalog = CatalogStore::default();
        let product = catalog.by_id(1_u64).ok_or("missing sample product")?;
        let mut out = Vec::new();

        write_product(&mut out, product)?;

        let output = String::from_utf8(out)?;
        assert!(output.contains("Pearl Whisper Flats"));
        assert!(output.contains("In Stock (40 available)"));
        assert!(output.contains("★★★★½ 4.8 (24 reviews)"));
        assert!(!output.contains('<'));

        Ok(())
    }
}
