//! Demonstration catalog: twelve Yogyakarta restaurants.
//!
//! `seed_restaurants` clears the table and reinserts the catalog, so the
//! seeder can be re-run at any time to restore a known dataset.

use anyhow::Context;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use resto_core::types::PriceTier;

pub struct SeedRestaurant {
    pub name: &'static str,
    pub description: &'static str,
    pub address: &'static str,
    pub cuisine: &'static str,
    pub price_range: PriceTier,
    pub average_price: f64,
    pub rating: f64,
    pub open_time: &'static str,
    pub close_time: &'static str,
    pub phone: Option<&'static str>,
    pub image_url: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

pub const SEED: &[SeedRestaurant] = &[
    SeedRestaurant {
        name: "Gudeg Yu Djum",
        description: "Gudeg tradisional Yogyakarta yang terkenal dengan cita rasa autentik sejak tahun 1950. Menggunakan resep turun temurun dengan bumbu rempah pilihan.",
        address: "Jl. Wijilan No.167, Kraton, Yogyakarta",
        cuisine: "Indonesian",
        price_range: PriceTier::Low,
        average_price: 25000.0,
        rating: 4.5,
        open_time: "06:00",
        close_time: "21:00",
        phone: Some("0274-561593"),
        image_url: "https://images.unsplash.com/photo-1596040033229-a9821ebd058d?w=500",
        latitude: -7.8063,
        longitude: 110.3647,
    },
    SeedRestaurant {
        name: "Warung Bu Ageng",
        description: "Tahu telur dan lotek legendaris di Tugu yang sudah berdiri puluhan tahun. Terkenal dengan sambal kacangnya yang gurih.",
        address: "Jl. Sugeng Jeroni, Tugu, Yogyakarta",
        cuisine: "Indonesian",
        price_range: PriceTier::Low,
        average_price: 15000.0,
        rating: 4.3,
        open_time: "07:00",
        close_time: "17:00",
        phone: None,
        image_url: "https://images.unsplash.com/photo-1512058564366-18510be2db19?w=500",
        latitude: -7.7830,
        longitude: 110.3904,
    },
    SeedRestaurant {
        name: "Sate Klathak Pak Pong",
        description: "Sate kambing bakar khas Bantul dengan bumbu tradisional. Daging kambing muda yang empuk dengan aroma khas dari pembakaran arang.",
        address: "Jl. Imogiri Tim., Bantul, Yogyakarta",
        cuisine: "Indonesian",
        price_range: PriceTier::Medium,
        average_price: 45000.0,
        rating: 4.4,
        open_time: "17:00",
        close_time: "23:00",
        phone: Some("0274-367890"),
        image_url: "https://images.unsplash.com/photo-1529692236671-f1f6cf9683ba?w=500",
        latitude: -7.8878,
        longitude: 110.3297,
    },
    SeedRestaurant {
        name: "Angkringan Tugu",
        description: "Angkringan tradisional dengan suasana khas Yogyakarta. Menyajikan nasi kucing, sate usus, dan wedang hangat.",
        address: "Jl. Margahayu, Tugu, Yogyakarta",
        cuisine: "Indonesian",
        price_range: PriceTier::Low,
        average_price: 12000.0,
        rating: 4.2,
        open_time: "18:00",
        close_time: "02:00",
        phone: None,
        image_url: "https://images.unsplash.com/photo-1551218808-94e220e084d2?w=500",
        latitude: -7.7756,
        longitude: 110.3678,
    },
    SeedRestaurant {
        name: "Bakpia Pathok 25",
        description: "Toko bakpia terkenal di Malioboro dengan berbagai varian rasa. Bakpia khas Yogyakarta dengan kualitas terbaik.",
        address: "Jl. Malioboro No.25, Yogyakarta",
        cuisine: "Dessert",
        price_range: PriceTier::Low,
        average_price: 35000.0,
        rating: 4.1,
        open_time: "08:00",
        close_time: "21:00",
        phone: Some("0274-562533"),
        image_url: "https://images.unsplash.com/photo-1578985545062-69928b1d9587?w=500",
        latitude: -7.7926,
        longitude: 110.3656,
    },
    SeedRestaurant {
        name: "Jejamuran",
        description: "Restoran dengan konsep healthy food, khusus menyajikan berbagai olahan jamur. Menu vegetarian yang lezat dan bergizi.",
        address: "Jl. Kaliurang Km 4.5, Yogyakarta",
        cuisine: "Vegetarian",
        price_range: PriceTier::Medium,
        average_price: 55000.0,
        rating: 4.6,
        open_time: "10:00",
        close_time: "22:00",
        phone: Some("0274-881918"),
        image_url: "https://images.unsplash.com/photo-1565299624946-b28f40a0ca4b?w=500",
        latitude: -7.7398,
        longitude: 110.3756,
    },
    SeedRestaurant {
        name: "Mediterranea Restaurant",
        description: "Restoran fine dining dengan menu Mediterranean dan Western. Suasana romantis cocok untuk dinner special.",
        address: "Jl. Dalem KG III No.7, Yogyakarta",
        cuisine: "Mediterranean",
        price_range: PriceTier::High,
        average_price: 150000.0,
        rating: 4.7,
        open_time: "11:00",
        close_time: "23:00",
        phone: Some("0274-386366"),
        image_url: "https://images.unsplash.com/photo-1414235077428-338989a2e8c0?w=500",
        latitude: -7.8156,
        longitude: 110.3640,
    },
    SeedRestaurant {
        name: "Miyama Japanese Restaurant",
        description: "Restoran Jepang authentic dengan chef langsung dari Jepang. Menyajikan sushi, ramen, dan teppanyaki berkualitas tinggi.",
        address: "Jl. Laksda Adisucipto Km 8, Yogyakarta",
        cuisine: "Japanese",
        price_range: PriceTier::High,
        average_price: 120000.0,
        rating: 4.5,
        open_time: "11:30",
        close_time: "22:00",
        phone: Some("0274-485888"),
        image_url: "https://images.unsplash.com/photo-1579952363873-27d3bfad9c0d?w=500",
        latitude: -7.7847,
        longitude: 110.4083,
    },
    SeedRestaurant {
        name: "Warung Handayani",
        description: "Masakan Padang authentic dengan rendang dan gulai yang mantap. Warung keluarga dengan cita rasa traditional.",
        address: "Jl. Parangtritis Km 5, Yogyakarta",
        cuisine: "Padang",
        price_range: PriceTier::Medium,
        average_price: 35000.0,
        rating: 4.3,
        open_time: "08:00",
        close_time: "21:00",
        phone: Some("0274-376543"),
        image_url: "https://images.unsplash.com/photo-1516684669134-de6f6ba62051?w=500",
        latitude: -7.8445,
        longitude: 110.3789,
    },
    SeedRestaurant {
        name: "House of Raminten",
        description: "Restoran unik dengan konsep Javanese traditional yang kental. Menyajikan makanan khas Jawa dengan suasana yang autentik.",
        address: "Jl. FM Noto No.7, Kotabaru, Yogyakarta",
        cuisine: "Javanese",
        price_range: PriceTier::Medium,
        average_price: 65000.0,
        rating: 4.2,
        open_time: "10:00",
        close_time: "22:00",
        phone: Some("0274-566333"),
        image_url: "https://images.unsplash.com/photo-1504674900247-0877df9cc836?w=500",
        latitude: -7.7815,
        longitude: 110.3784,
    },
    SeedRestaurant {
        name: "Soto Bathok Mbah Katro",
        description: "Soto ayam legendaris dengan mangkok dari tempurung kelapa. Kuah yang gurih dan daging ayam yang empuk.",
        address: "Jl. Bantul No.92, Yogyakarta",
        cuisine: "Indonesian",
        price_range: PriceTier::Low,
        average_price: 18000.0,
        rating: 4.4,
        open_time: "08:00",
        close_time: "16:00",
        phone: None,
        image_url: "https://images.unsplash.com/photo-1547592166-23ac45744acd?w=500",
        latitude: -7.8234,
        longitude: 110.3712,
    },
    SeedRestaurant {
        name: "Milas Vegetarian",
        description: "Restoran vegetarian dengan menu beragam. Cocok untuk yang menjalani diet sehat atau vegetarian lifestyle.",
        address: "Jl. Prawirotaman No.8, Yogyakarta",
        cuisine: "Vegetarian",
        price_range: PriceTier::Medium,
        average_price: 40000.0,
        rating: 4.1,
        open_time: "09:00",
        close_time: "21:00",
        phone: Some("0274-376789"),
        image_url: "https://images.unsplash.com/photo-1512621776951-a57141f2eefd?w=500",
        latitude: -7.8167,
        longitude: 110.3678,
    },
];

/// Clear the restaurants table and insert the demonstration catalog.
/// Returns the number of rows inserted.
pub async fn seed_restaurants(pool: &PgPool) -> anyhow::Result<usize> {
    sqlx::query("DELETE FROM restaurants")
        .execute(pool)
        .await
        .context("clearing restaurants")?;

    for entry in SEED {
        sqlx::query(
            r#"
            INSERT INTO restaurants
                (id, name, description, address, cuisine, price_range,
                 average_price, rating, open_time, close_time,
                 phone, image_url, latitude, longitude)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(entry.name)
        .bind(entry.description)
        .bind(entry.address)
        .bind(entry.cuisine)
        .bind(entry.price_range.as_str())
        .bind(entry.average_price)
        .bind(entry.rating)
        .bind(entry.open_time)
        .bind(entry.close_time)
        .bind(entry.phone)
        .bind(entry.image_url)
        .bind(entry.latitude)
        .bind(entry.longitude)
        .execute(pool)
        .await
        .with_context(|| format!("seeding {}", entry.name))?;
    }

    info!(count = SEED.len(), "seeded demonstration catalog");
    Ok(SEED.len())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn catalog_has_twelve_unique_restaurants() {
        assert_eq!(SEED.len(), 12);
        let names: HashSet<_> = SEED.iter().map(|r| r.name).collect();
        assert_eq!(names.len(), SEED.len());
    }

    #[test]
    fn catalog_coordinates_sit_around_yogyakarta() {
        for entry in SEED {
            assert!(
                (-8.0..=-7.5).contains(&entry.latitude),
                "{} latitude {}",
                entry.name,
                entry.latitude
            );
            assert!(
                (110.0..=110.5).contains(&entry.longitude),
                "{} longitude {}",
                entry.name,
                entry.longitude
            );
        }
    }

    #[test]
    fn catalog_hours_and_prices_are_sane() {
        for entry in SEED {
            assert!(entry.average_price > 0.0, "{}", entry.name);
            assert!((0.0..=5.0).contains(&entry.rating), "{}", entry.name);
            assert_eq!(entry.open_time.len(), 5, "{}", entry.name);
            assert_eq!(entry.close_time.len(), 5, "{}", entry.name);
        }
    }
}
