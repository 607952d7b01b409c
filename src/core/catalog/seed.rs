//! Sample catalog loaded at startup when `SEED_CATALOG` is enabled

use crate::core::db::models::NewProduct;

const PLACEHOLDER_IMAGE_BASE: &str = "https://via.placeholder.com/300x200?text=";

/// (name, description, price, category, stock)
const SAMPLE_PRODUCTS: &[(&str, &str, f64, &str, i32)] = &[
    ("Smartphone X", "Latest smartphone with advanced features", 999.99, "Electronics", 50),
    ("Laptop Pro", "High-performance laptop for professionals", 1499.99, "Electronics", 30),
    ("Wireless Earbuds", "Premium wireless earbuds with noise cancellation", 199.99, "Electronics", 100),
    ("Smart Watch", "Fitness tracker and smartwatch with health monitoring", 299.99, "Electronics", 75),
    ("4K Monitor", "Ultra-wide 4K display for professionals", 799.99, "Electronics", 25),
    ("Designer T-Shirt", "Premium cotton t-shirt with modern design", 49.99, "Clothing", 200),
    ("Denim Jacket", "Classic denim jacket with modern fit", 89.99, "Clothing", 60),
    ("Running Shoes", "Lightweight running shoes with advanced cushioning", 129.99, "Clothing", 80),
    ("Smart Coffee Maker", "WiFi-enabled coffee maker with app control", 149.99, "Home & Kitchen", 40),
    ("Air Purifier", "HEPA air purifier for large rooms", 199.99, "Home & Kitchen", 35),
    ("Best Seller Novel", "Award-winning fiction novel", 19.99, "Books", 150),
    ("Cookbook Collection", "Complete set of gourmet recipes", 49.99, "Books", 45),
    ("Yoga Mat", "Premium non-slip yoga mat", 39.99, "Sports", 120),
    ("Dumbbell Set", "Adjustable weight dumbbell set", 149.99, "Sports", 30),
    ("Skincare Set", "Complete skincare routine set", 79.99, "Beauty", 90),
    ("Perfume Collection", "Luxury fragrance collection", 199.99, "Beauty", 25),
    ("Educational Robot", "Interactive learning robot for kids", 89.99, "Toys", 55),
    ("Building Blocks Set", "Creative building blocks for all ages", 59.99, "Toys", 70),
    ("Ergonomic Chair", "Comfortable office chair with lumbar support", 299.99, "Office", 20),
    ("Wireless Keyboard", "Slim wireless keyboard with numeric pad", 69.99, "Office", 85),
    ("Smart Garden Kit", "Automated indoor garden system", 199.99, "Garden", 40),
    ("Garden Tools Set", "Complete set of gardening tools", 79.99, "Garden", 60),
];

fn placeholder_image(name: &str) -> String {
    format!("{PLACEHOLDER_IMAGE_BASE}{}", name.replace(' ', "+"))
}

/// The sample catalog
pub fn sample_products() -> Vec<NewProduct> {
    SAMPLE_PRODUCTS
        .iter()
        .map(|&(name, description, price, category, stock)| NewProduct {
            name: name.to_string(),
            description: description.to_string(),
            price,
            category: category.to_string(),
            stock,
            image: placeholder_image(name),
        })
        .collect()
}
