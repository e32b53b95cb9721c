//! Built-in catalog data.
//!
//! Seed rows are plain `&'static str` tables; [`categories`] and
//! [`products`] turn them into validated catalog types.

use chrono::NaiveDate;

use naturindo_core::{CategoryId, Price, ProductId, Rating, Slug, TestimonialId};

use super::{CatalogError, Category, CategoryRef, HeroSlide, Product, Testimonial};

struct CategorySeed {
    id: i32,
    name: &'static str,
    slug: &'static str,
    description: &'static str,
    icon: &'static str,
}

struct ProductSeed {
    id: i32,
    name: &'static str,
    slug: &'static str,
    description: &'static str,
    price: u64,
    original_price: Option<u64>,
    category: i32,
    rating: f32,
    review_count: u32,
    composition: &'static [&'static str],
    usage: &'static str,
    benefits: &'static [&'static str],
    stock: u32,
}

/// (product id, reviewer, rating, comment, `YYYY-MM-DD`, verified)
type TestimonialSeed = (i32, &'static str, f32, &'static str, &'static str, bool);

const CATEGORIES: &[CategorySeed] = &[
    CategorySeed {
        id: 1,
        name: "Jamu Tradisional",
        slug: "jamu-tradisional",
        description: "Racikan warisan leluhur untuk kebugaran sehari-hari",
        icon: "🌿",
    },
    CategorySeed {
        id: 2,
        name: "Imunitas",
        slug: "imunitas",
        description: "Suplemen herbal untuk menjaga daya tahan tubuh",
        icon: "🛡️",
    },
    CategorySeed {
        id: 3,
        name: "Madu & Propolis",
        slug: "madu-propolis",
        description: "Madu murni dan propolis dari peternak lebah lokal",
        icon: "🍯",
    },
    CategorySeed {
        id: 4,
        name: "Teh Herbal",
        slug: "teh-herbal",
        description: "Seduhan daun dan bunga pilihan untuk relaksasi",
        icon: "🍵",
    },
    CategorySeed {
        id: 5,
        name: "Kapsul Herbal",
        slug: "kapsul-herbal",
        description: "Ekstrak herbal terstandar dalam bentuk kapsul praktis",
        icon: "💊",
    },
];

const PRODUCTS: &[ProductSeed] = &[
    ProductSeed {
        id: 1,
        name: "Jamu Kunyit Asam",
        slug: "jamu-kunyit-asam",
        description: "Minuman kunyit dan asam jawa yang menyegarkan dan membantu melancarkan pencernaan.",
        price: 35_000,
        original_price: Some(45_000),
        category: 1,
        rating: 4.8,
        review_count: 214,
        composition: &["Kunyit", "Asam jawa", "Gula aren", "Air"],
        usage: "Kocok dahulu, minum 1 botol sehari setelah makan.",
        benefits: &["Melancarkan pencernaan", "Menyegarkan tubuh", "Antioksidan alami"],
        stock: 120,
    },
    ProductSeed {
        id: 2,
        name: "Madu Hutan Sumbawa",
        slug: "madu-hutan-sumbawa",
        description: "Madu liar dari hutan Sumbawa, dipanen secara lestari tanpa pemanasan.",
        price: 120_000,
        original_price: Some(150_000),
        category: 3,
        rating: 4.9,
        review_count: 389,
        composition: &["Madu hutan murni 100%"],
        usage: "Konsumsi 1-2 sendok makan sehari, langsung atau dilarutkan air hangat.",
        benefits: &["Sumber energi alami", "Menjaga daya tahan tubuh", "Meredakan batuk"],
        stock: 64,
    },
    ProductSeed {
        id: 3,
        name: "Kapsul Temulawak",
        slug: "kapsul-temulawak",
        description: "Ekstrak temulawak terstandar untuk membantu memelihara kesehatan fungsi hati.",
        price: 80_000,
        original_price: None,
        category: 5,
        rating: 4.6,
        review_count: 152,
        composition: &["Ekstrak temulawak 500 mg", "Kapsul nabati"],
        usage: "Minum 2 kapsul sehari setelah makan.",
        benefits: &["Memelihara kesehatan hati", "Menambah nafsu makan"],
        stock: 200,
    },
    ProductSeed {
        id: 4,
        name: "Teh Rosella Merah",
        slug: "teh-rosella-merah",
        description: "Kelopak rosella kering dengan rasa asam segar dan warna merah alami.",
        price: 45_000,
        original_price: None,
        category: 4,
        rating: 4.5,
        review_count: 98,
        composition: &["Kelopak bunga rosella kering"],
        usage: "Seduh 1 kantong dengan 200 ml air panas selama 5 menit.",
        benefits: &["Kaya vitamin C", "Membantu menjaga tekanan darah", "Menyegarkan"],
        stock: 150,
    },
    ProductSeed {
        id: 5,
        name: "Propolis Brazilian Green",
        slug: "propolis-brazilian-green",
        description: "Tetes propolis hijau berkualitas tinggi untuk perlindungan ekstra.",
        price: 250_000,
        original_price: Some(275_000),
        category: 3,
        rating: 4.7,
        review_count: 176,
        composition: &["Ekstrak propolis hijau", "Air murni"],
        usage: "Teteskan 10 tetes ke dalam air minum, 3 kali sehari.",
        benefits: &["Meningkatkan imunitas", "Antibakteri alami", "Menjaga kesehatan mulut"],
        stock: 40,
    },
    ProductSeed {
        id: 6,
        name: "Jamu Beras Kencur",
        slug: "jamu-beras-kencur",
        description: "Perpaduan beras dan kencur yang menghangatkan dan mengurangi pegal linu.",
        price: 30_000,
        original_price: None,
        category: 1,
        rating: 4.7,
        review_count: 187,
        composition: &["Beras", "Kencur", "Jahe", "Gula aren"],
        usage: "Minum 1 botol sehari, sajikan dingin lebih nikmat.",
        benefits: &["Mengurangi pegal linu", "Menambah stamina"],
        stock: 95,
    },
    ProductSeed {
        id: 7,
        name: "Kapsul Meniran Imun",
        slug: "kapsul-meniran-imun",
        description: "Ekstrak meniran untuk membantu memelihara daya tahan tubuh.",
        price: 95_000,
        original_price: Some(110_000),
        category: 2,
        rating: 4.6,
        review_count: 143,
        composition: &["Ekstrak meniran 250 mg", "Ekstrak sambiloto 100 mg"],
        usage: "Minum 1 kapsul 2 kali sehari.",
        benefits: &["Memelihara daya tahan tubuh", "Membantu pemulihan"],
        stock: 80,
    },
    ProductSeed {
        id: 8,
        name: "Teh Jahe Serai",
        slug: "teh-jahe-serai",
        description: "Seduhan jahe merah dan serai yang menghangatkan di musim hujan.",
        price: 40_000,
        original_price: None,
        category: 4,
        rating: 4.4,
        review_count: 76,
        composition: &["Jahe merah", "Serai", "Kayu manis"],
        usage: "Seduh 1 kantong dengan air panas, tambahkan madu bila suka.",
        benefits: &["Menghangatkan tubuh", "Meredakan perut kembung"],
        stock: 130,
    },
    ProductSeed {
        id: 9,
        name: "Habbatussauda Plus",
        slug: "habbatussauda-plus",
        description: "Minyak jintan hitam dalam kapsul lunak untuk menjaga kebugaran.",
        price: 85_000,
        original_price: None,
        category: 2,
        rating: 4.8,
        review_count: 265,
        composition: &["Minyak jintan hitam 500 mg", "Gelatin"],
        usage: "Minum 2 kapsul 3 kali sehari.",
        benefits: &["Menjaga daya tahan tubuh", "Antioksidan"],
        stock: 0,
    },
    ProductSeed {
        id: 10,
        name: "Madu Klanceng",
        slug: "madu-klanceng",
        description: "Madu lebah tanpa sengat dengan rasa asam manis yang khas.",
        price: 180_000,
        original_price: None,
        category: 3,
        rating: 4.9,
        review_count: 121,
        composition: &["Madu klanceng murni 100%"],
        usage: "Konsumsi 1 sendok makan di pagi hari sebelum makan.",
        benefits: &["Kaya antioksidan", "Menjaga daya tahan tubuh"],
        stock: 25,
    },
    ProductSeed {
        id: 11,
        name: "Kapsul Sambiloto",
        slug: "kapsul-sambiloto",
        description: "Ekstrak sambiloto untuk membantu menjaga kadar gula darah normal.",
        price: 75_000,
        original_price: Some(90_000),
        category: 5,
        rating: 4.3,
        review_count: 64,
        composition: &["Ekstrak sambiloto 350 mg", "Kapsul nabati"],
        usage: "Minum 1 kapsul 3 kali sehari setelah makan.",
        benefits: &["Membantu menjaga gula darah", "Menurunkan demam"],
        stock: 110,
    },
    ProductSeed {
        id: 12,
        name: "Wedang Uwuh Instan",
        slug: "wedang-uwuh-instan",
        description: "Minuman rempah khas Yogyakarta dalam sachet siap seduh.",
        price: 50_000,
        original_price: None,
        category: 1,
        rating: 4.6,
        review_count: 88,
        composition: &["Jahe", "Secang", "Cengkih", "Kayu manis", "Gula batu"],
        usage: "Larutkan 1 sachet dalam 150 ml air panas.",
        benefits: &["Menghangatkan tubuh", "Melegakan tenggorokan"],
        stock: 70,
    },
];

const TESTIMONIALS: &[TestimonialSeed] = &[
    (1, "Rina W.", 5.0, "Segar sekali, perut jadi lebih nyaman.", "2024-11-02", true),
    (1, "Dedi S.", 4.5, "Rasanya pas, tidak terlalu manis.", "2024-10-18", true),
    (2, "Siti A.", 5.0, "Madunya kental dan wangi, anak-anak suka.", "2024-12-01", true),
    (2, "Agus P.", 4.8, "Asli, sudah langganan setahun.", "2024-09-27", false),
    (3, "Yuni K.", 4.5, "Nafsu makan membaik setelah dua minggu.", "2024-08-14", true),
    (5, "Hendra L.", 4.7, "Jarang sakit sejak rutin minum propolis.", "2024-11-20", true),
    (9, "Fitri N.", 5.0, "Kapsulnya mudah ditelan, tidak amis.", "2024-07-03", true),
];

/// Category table, with product counts left at zero for the catalog to fill in.
pub(super) fn categories() -> Result<Vec<Category>, CatalogError> {
    CATEGORIES
        .iter()
        .map(|seed| {
            Ok(Category {
                id: CategoryId::new(seed.id),
                name: seed.name.to_string(),
                slug: Slug::parse(seed.slug)?,
                description: seed.description.to_string(),
                icon: seed.icon.to_string(),
                product_count: 0,
            })
        })
        .collect()
}

/// Product table in featured order.
pub(super) fn products() -> Result<Vec<Product>, CatalogError> {
    let categories = categories()?;

    PRODUCTS
        .iter()
        .map(|seed| {
            let category = categories
                .iter()
                .find(|c| c.id.as_i32() == seed.category)
                .ok_or_else(|| CatalogError::UnknownCategory {
                    product: seed.slug.to_string(),
                    category: CategoryId::new(seed.category),
                })?;

            Ok(Product {
                id: ProductId::new(seed.id),
                name: seed.name.to_string(),
                slug: Slug::parse(seed.slug)?,
                description: seed.description.to_string(),
                price: Price::from_rupiah(seed.price),
                original_price: seed.original_price.map(Price::from_rupiah),
                image: format!("/static/images/products/{}.jpg", seed.slug),
                category: CategoryRef {
                    id: category.id,
                    name: category.name.clone(),
                    slug: category.slug.clone(),
                },
                rating: Rating::new(seed.rating),
                review_count: seed.review_count,
                composition: seed.composition.iter().map(ToString::to_string).collect(),
                usage: seed.usage.to_string(),
                benefits: seed.benefits.iter().map(ToString::to_string).collect(),
                stock: seed.stock,
                testimonials: testimonials_for(seed.id),
            })
        })
        .collect()
}

fn testimonials_for(product_id: i32) -> Vec<Testimonial> {
    TESTIMONIALS
        .iter()
        .zip(1..)
        .filter(|((pid, ..), _)| *pid == product_id)
        .filter_map(|(&(_, name, rating, comment, date, verified), id)| {
            // Malformed dates are dropped rather than failing the whole catalog
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
            Some(Testimonial {
                id: TestimonialId::new(id),
                name: name.to_string(),
                rating: Rating::new(rating),
                comment: comment.to_string(),
                date,
                verified,
            })
        })
        .collect()
}

/// Home page carousel.
pub(super) fn hero_slides() -> Vec<HeroSlide> {
    vec![
        HeroSlide {
            title: "Sehat Alami dari Bumi Nusantara".to_string(),
            subtitle: "Jamu dan suplemen herbal pilihan, diracik dari rempah asli Indonesia."
                .to_string(),
            image: "/static/images/hero/rempah.jpg".to_string(),
            cta_text: "Belanja Sekarang".to_string(),
            cta_link: "/products".to_string(),
            is_ad: false,
        },
        HeroSlide {
            title: "Madu Hutan Murni".to_string(),
            subtitle: "Dipanen lestari dari hutan Sumbawa, tanpa campuran.".to_string(),
            image: "/static/images/hero/madu.jpg".to_string(),
            cta_text: "Lihat Madu".to_string(),
            cta_link: "/products?category=madu-propolis".to_string(),
            is_ad: false,
        },
        HeroSlide {
            title: "Promo Imunitas Akhir Tahun".to_string(),
            subtitle: "Hemat hingga 15% untuk paket suplemen daya tahan tubuh.".to_string(),
            image: "/static/images/hero/promo-imunitas.jpg".to_string(),
            cta_text: "Ambil Promo".to_string(),
            cta_link: "/products?category=imunitas".to_string(),
            is_ad: true,
        },
    ]
}
