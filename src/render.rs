//! HTML fragments
//!
//! Pure presentation: every function takes values and returns markup, with no
//! access to the catalog or the ledger. Text from products and line items is
//! escaped before it is embedded.

use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::{
    cart::items::LineItem,
    checkout::Order,
    prices::{Price, group_thousands},
    pricing::{self, TotalPriceError},
    products::Product,
};

/// Longest card description, in characters, before it is cut with an ellipsis.
pub const CARD_DESCRIPTION_LIMIT: usize = 100;

const MAX_STARS: usize = 5;

/// A named render target whose whole content is replaced on every render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Container {
    id: String,
    html: String,
}

impl Container {
    /// Create an empty container.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            html: String::new(),
        }
    }

    /// Container id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current content.
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Replace the content.
    pub fn replace(&mut self, html: String) {
        self.html = html;
    }
}

/// Escape `&`, `<`, `>`, `"` and `'` for use in element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }

    escaped
}

/// Format a price as Rupiah, e.g. `Rp 329.000`.
pub fn format_price(price: Price) -> String {
    price.to_string()
}

/// Counts of (full, half, empty) stars for a rating.
///
/// `floor(rating)` full stars, one half star when there is a fractional part,
/// and empty stars up to five. Ratings are clamped to 0 to 5.
pub fn star_counts(rating: Decimal) -> (usize, usize, usize) {
    let rating = rating.clamp(Decimal::ZERO, Decimal::from(5));
    let full = rating.floor().to_usize().unwrap_or(0).min(MAX_STARS);
    let half = usize::from(!rating.fract().is_zero() && full < MAX_STARS);

    (full, half, MAX_STARS - full - half)
}

/// Star glyph markup for a rating.
pub fn star_rating(rating: Decimal) -> String {
    let (full, half, empty) = star_counts(rating);

    let mut stars = String::new();
    stars.push_str(&r#"<i class="fas fa-star"></i>"#.repeat(full));
    stars.push_str(&r#"<i class="fas fa-star-half-alt"></i>"#.repeat(half));
    stars.push_str(&r#"<i class="far fa-star"></i>"#.repeat(empty));

    stars
}

/// Cut `text` to at most `limit` characters, ending with `...` when cut.
pub fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }

    let mut cut: String = text.chars().take(limit.saturating_sub(3)).collect();
    cut.truncate(cut.trim_end().len());
    cut.push_str("...");

    cut
}

/// Product card
pub fn product_card(product: &Product) -> String {
    let name = escape_html(&product.name);
    let id = product.id;

    let mut badges = String::new();
    if product.is_new {
        badges.push_str(r#"<div class="product-badge new">New</div>"#);
    }
    if product.is_featured {
        badges.push_str(r#"<div class="product-badge featured">Featured</div>"#);
    }

    format!(
        r#"<div class="product-card" data-product-id="{id}">{badges}<img src="{image}" alt="{name}" class="product-image"><div class="product-info"><h3 class="product-name">{name}</h3><p class="product-price">{price}</p><div class="product-rating"><div class="stars">{stars}</div><span class="rating-text">({reviews} reviews)</span></div><p class="product-description">{description}</p><div class="product-buttons"><a href="product-detail.html?id={id}" class="btn btn-primary">Detail</a><button class="btn btn-secondary" data-action="add-to-cart" data-name="{name}" data-price="{raw_price}"><i class="fas fa-shopping-cart"></i> Add to Cart</button></div></div></div>"#,
        image = escape_html(&product.image),
        price = format_price(product.price),
        stars = star_rating(product.rating),
        reviews = product.reviews,
        description = escape_html(&truncate(&product.description, CARD_DESCRIPTION_LIMIT)),
        raw_price = *product.price,
    )
}

/// Cards for every product, concatenated.
pub fn product_grid<'a>(products: impl IntoIterator<Item = &'a Product>) -> String {
    products.into_iter().map(product_card).collect()
}

/// Product detail view
pub fn product_detail(product: &Product) -> String {
    let name = escape_html(&product.name);

    let features: String = product
        .features
        .iter()
        .map(|feature| format!("<li>{}</li>", escape_html(feature)))
        .collect();

    let sizes: String = product
        .sizes
        .iter()
        .map(|size| {
            let size = escape_html(size);
            format!(r#"<button class="size-option" data-size="{size}">{size}</button>"#)
        })
        .collect();

    let colors: String = product
        .colors
        .iter()
        .map(|color| {
            let color = escape_html(color);
            format!(r#"<button class="color-option" data-color="{color}" title="{color}">{color}</button>"#)
        })
        .collect();

    let (stock_class, stock_status) = if product.in_stock() {
        ("in-stock", "In Stock")
    } else {
        ("out-of-stock", "Out of Stock")
    };

    let button = if product.in_stock() {
        format!(
            r#"<button class="add-to-cart-btn" data-action="add-to-cart" data-name="{name}" data-price="{}">Add to Cart</button>"#,
            *product.price
        )
    } else {
        r#"<button class="add-to-cart-btn" disabled>Out of Stock</button>"#.to_string()
    };

    format!(
        r#"<div class="product-detail" data-product-id="{id}"><img src="{image}" alt="{name}" class="product-main-image"><h1 class="product-title">{name}</h1><p class="product-price">{price}</p><p class="product-category">{category}</p><p class="product-description">{description}</p><div class="product-rating"><div class="stars">{stars}</div><span class="rating-value">{rating}</span><span class="reviews-count">({reviews} reviews)</span></div><ul class="features-list">{features}</ul><div class="size-options">{sizes}</div><div class="color-options">{colors}</div><div class="stock-info"><span class="{stock_class}">{stock_status} ({stock} available)</span></div>{button}</div>"#,
        id = product.id,
        image = escape_html(&product.image),
        price = format_price(product.price),
        category = escape_html(&product.category),
        description = escape_html(&product.long_description),
        stars = star_rating(product.rating),
        rating = product.rating.normalize(),
        reviews = product.reviews,
        stock = product.stock,
    )
}

/// Cart panel: an empty-state message, or one row per item and the total.
///
/// # Errors
///
/// Returns a [`TotalPriceError`] if the total does not fit a price.
pub fn cart(items: &[LineItem]) -> Result<String, TotalPriceError> {
    if items.is_empty() {
        return Ok(r#"<p class="cart-empty">Your cart is empty</p>"#.to_string());
    }

    let rows: String = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            format!(
                r#"<div class="cart-item"><div class="cart-item-info"><h4>{name}</h4><p class="cart-item-price">{price}</p></div><button class="remove-btn" data-action="remove-from-cart" data-index="{index}"><i class="fas fa-trash"></i></button></div>"#,
                name = escape_html(&item.name),
                price = format_price(item.price),
            )
        })
        .collect();

    let total = pricing::subtotal(items)?;

    Ok(format!(
        r#"<div class="cart-items">{rows}</div><div class="cart-total"><strong>Total: {}</strong></div>"#,
        format_price(total)
    ))
}

/// Header cart counter, hidden when the cart is empty.
pub fn cart_counter(count: usize) -> String {
    let display = if count > 0 { "block" } else { "none" };

    format!(r#"<span class="cart-counter" style="display: {display}">{count}</span>"#)
}

/// Order confirmation shown after a successful checkout.
pub fn order_confirmation(order: &Order) -> String {
    format!(
        r#"<div class="success-notification"><div class="success-content"><div class="success-header"><i class="fas fa-check-circle"></i><h3>Order placed!</h3></div><div class="success-body"><p><strong>Order number:</strong> {number}</p><p><strong>Total:</strong> Rp {total}</p><p><strong>Payment method:</strong> {payment}</p><p><strong>Date:</strong> {date} {time}</p><p><strong>Items:</strong> {count} products</p></div></div></div>"#,
        number = order.number(),
        total = group_thousands(*order.total()),
        payment = escape_html(order.payment().label()),
        date = order.date(),
        time = order.time(),
        count = order.items().len(),
    )
}
