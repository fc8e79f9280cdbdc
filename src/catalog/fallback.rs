//! Built-in sample products, used when no dataset is supplied.

use rust_decimal::Decimal;

use crate::{
    prices::Price,
    products::{Labels, Product, ProductId},
};

fn labels(values: &[&str]) -> Labels {
    values.iter().map(ToString::to_string).collect()
}

fn standard_sizes() -> Labels {
    labels(&["36", "37", "38", "39", "40"])
}

/// The three sample products shipped with the store.
pub(crate) fn products() -> Vec<Product> {
    vec![
        Product {
            id: ProductId::new(1),
            name: "Pearl Whisper Flats".to_string(),
            price: Price::new(329_000),
            image: "Images/product1.jpg".to_string(),
            category: "Ballet Flats".to_string(),
            description: "White ballet flats with a ribbon accent and pearl & metallic heart charms."
                .to_string(),
            long_description: "Simple elegance in clean white. Pearl ornaments and a soft ribbon \
                at the front make these flats right for everyday outfits, and the flexible flat \
                sole keeps them comfortable all day."
                .to_string(),
            features: labels(&["Premium material", "Anti-slip sole", "Timeless design"]),
            sizes: standard_sizes(),
            colors: labels(&["White Pearl"]),
            stock: 40,
            rating: Decimal::new(48, 1),
            reviews: 24,
            is_new: true,
            is_featured: true,
        },
        Product {
            id: ProductId::new(2),
            name: "Blush Charm".to_string(),
            price: Price::new(349_000),
            image: "Images/product2.png".to_string(),
            category: "Ballet Flats".to_string(),
            description: "Pink satin ballet flats with a crisscross strap and metallic bead detail."
                .to_string(),
            long_description: "A soft, feminine touch in pastel pink. Pearl details on the front \
                bow add a sweet, elegant note for casual and semi-formal looks."
                .to_string(),
            features: labels(&["Quality leather", "Cushion comfort", "Minimalist design"]),
            sizes: standard_sizes(),
            colors: labels(&["Soft Pink"]),
            stock: 40,
            rating: Decimal::new(48, 1),
            reviews: 18,
            is_new: false,
            is_featured: true,
        },
        Product {
            id: ProductId::new(3),
            name: "Sky Pearl Flats".to_string(),
            price: Price::new(379_000),
            image: "Images/product3.png".to_string(),
            category: "Ballet Flats".to_string(),
            description: "Pastel blue flats with a ribbon accent and pearl charm.".to_string(),
            long_description: "Comfort wrapped in pastel blue. Neatly set pearl ornaments on the \
                front strap give a subtle, distinctive accent."
                .to_string(),
            features: labels(&["7cm heel", "Suede material", "Pointed toe"]),
            sizes: standard_sizes(),
            colors: labels(&["Soft Blue"]),
            stock: 40,
            rating: Decimal::new(48, 1),
            reviews: 31,
            is_new: false,
            is_featured: true,
        },
    ]
}
