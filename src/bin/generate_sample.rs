//! Writes a deterministic synthetic listings dataset to `data/listings.csv`
//! so the app can run without the real export.

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn next_range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    // Country, city hub, hub coordinates.
    let countries: [(&str, &str, f64, f64); 5] = [
        ("United States", "Brooklyn", 40.68, -73.94),
        ("France", "Le Marais", 48.86, 2.36),
        ("Spain", "El Raval", 41.38, 2.17),
        ("Japan", "Shibuya", 35.66, 139.70),
        ("Australia", "Bondi", -33.89, 151.27),
    ];

    // Property type with a base nightly price.
    let property_types: [(&str, f64); 5] = [
        ("Apartment", 90.0),
        ("House", 140.0),
        ("Loft", 120.0),
        ("Condominium", 110.0),
        ("Villa", 260.0),
    ];

    let room_types = ["Entire home/apt", "Private room", "Shared room"];
    let bed_types = ["Real Bed", "Futon", "Pull-out Sofa"];
    let adjectives = ["Cozy", "Sunny", "Modern", "Charming", "Spacious", "Quiet"];

    std::fs::create_dir_all("data").expect("Failed to create data directory");
    let output_path = "data/listings.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");

    writer
        .write_record([
            "name",
            "host_id",
            "country",
            "room_type",
            "property_type",
            "price",
            "number_of_reviews",
            "review_scores",
            "bed_type",
            "is_location_exact",
            "availability_365",
            "latitude",
            "longitude",
            "accommodates",
        ])
        .expect("Failed to write header");

    let mut rows = 0usize;
    for (country, hub, lat, lon) in countries {
        let listings_here = 30 + (rng.next_u64() % 15) as usize;
        for i in 0..listings_here {
            let (property_type, base_price) = *rng.pick(&property_types);
            let room_type = *rng.pick(&room_types);
            let bed_type = *rng.pick(&bed_types);
            let adjective = *rng.pick(&adjectives);

            let room_factor = match room_type {
                "Entire home/apt" => 1.0,
                "Private room" => 0.55,
                _ => 0.3,
            };
            let price = base_price * room_factor * rng.next_range(0.7, 1.8);
            let accommodates = 1 + (rng.next_u64() % 7) as i64;

            writer
                .write_record([
                    format!("{adjective} {property_type} in {hub} #{i}"),
                    format!("{}", 1000 + rows),
                    country.to_string(),
                    room_type.to_string(),
                    property_type.to_string(),
                    format!("{price:.2}"),
                    format!("{}", rng.next_u64() % 320),
                    format!("{:.1}", rng.next_range(2.5, 5.0)),
                    bed_type.to_string(),
                    format!("{}", rng.next_f64() < 0.8),
                    format!("{}", rng.next_u64() % 366),
                    format!("{:.5}", lat + rng.next_range(-0.08, 0.08)),
                    format!("{:.5}", lon + rng.next_range(-0.08, 0.08)),
                    format!("{accommodates}"),
                ])
                .expect("Failed to write row");
            rows += 1;
        }
    }

    writer.flush().expect("Failed to flush CSV");
    println!("Wrote {rows} listings to {output_path}");
}
