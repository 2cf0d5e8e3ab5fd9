use std::path::PathBuf;

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

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// Deliberately messy headers: stray spaces, accents, punctuation,
/// duplicates after normalization and a blank.
const HEADERS: [&str; 8] = [
    "Order ID",
    " Product Name ",
    "Région",
    "Unit Price ($)",
    "Quantity",
    "Total-Cost",
    "QUANTITY",
    "",
];

const PRODUCTS: [&str; 5] = ["Widget", "Gadget", "Doohickey", "Gizmo", "Sprocket"];
const REGIONS: [&str; 4] = ["North", "Sud", "Est", "Ouest"];
const GARBAGE: [&str; 3] = ["n/a", "??", "TBD"];

fn messy_number(rng: &mut SimpleRng, value: String) -> String {
    if rng.chance(0.08) {
        String::new()
    } else if rng.chance(0.05) {
        GARBAGE[rng.below(GARBAGE.len())].to_string()
    } else {
        value
    }
}

fn main() {
    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/raw/sales_data_raw.csv"));
    let n_rows = 200;
    let mut rng = SimpleRng::new(42);

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).expect("Failed to create output directory");
    }
    let mut writer = csv::Writer::from_path(&output_path).expect("Failed to create output file");
    writer.write_record(HEADERS).expect("Failed to write header");

    for order_id in 1..=n_rows {
        let unit_price = (rng.next_f64() * 50.0 * 100.0).round() / 100.0;
        // Occasional zero or negative quantities for the positivity filter.
        let quantity = rng.below(12) as i64 - 1;
        let total = unit_price * quantity as f64;

        let record = [
            order_id.to_string(),
            PRODUCTS[rng.below(PRODUCTS.len())].to_string(),
            REGIONS[rng.below(REGIONS.len())].to_string(),
            messy_number(&mut rng, format!("{unit_price:.2}")),
            messy_number(&mut rng, quantity.to_string()),
            messy_number(&mut rng, format!("{total:.2}")),
            quantity.to_string(),
            if rng.chance(0.5) { "x".to_string() } else { String::new() },
        ];
        writer.write_record(&record).expect("Failed to write row");
    }
    writer.flush().expect("Failed to flush output");

    println!("Wrote {n_rows} sales rows to {}", output_path.display());
}
