use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const GENRES: [&str; 10] = [
    "Action", "Adventure", "Comedy", "Drama", "Fantasy", "Mystery", "Romance", "Sci-Fi",
    "Slice of Life", "Sports",
];
const STATUSES: [(&str, f64); 3] = [
    ("Finished Airing", 0.85),
    ("Currently Airing", 0.12),
    ("Not yet aired", 0.03),
];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const SYLLABLES: [&str; 12] = [
    "ka", "shi", "ro", "mei", "tsu", "na", "ha", "ru", "yo", "ki", "sora", "ten",
];

/// Deterministic splitmix64 stream; the sample file must be reproducible.
struct SampleRng(u64);

impl SampleRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let r = (-2.0 * (1.0 - self.unit()).ln()).sqrt();
        let theta = std::f64::consts::TAU * self.unit();
        mean + std_dev * r * theta.sin()
    }
}

fn title(rng: &mut SampleRng) -> String {
    let n = 2 + rng.below(3);
    let mut s: String = (0..n).map(|_| SYLLABLES[rng.below(SYLLABLES.len())]).collect();
    if let Some(first) = s.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    s
}

fn date(rng: &mut SampleRng, year: i32) -> String {
    format!("{} {}, {year}", MONTHS[rng.below(12)], 1 + rng.below(28))
}

fn main() {
    let mut rng = SampleRng(42);
    let n_rows = 600;

    let mut names: Vec<Option<String>> = Vec::new();
    let mut scores: Vec<Option<f64>> = Vec::new();
    let mut genres: Vec<String> = Vec::new();
    let mut synopses: Vec<Option<String>> = Vec::new();
    let mut episodes: Vec<Option<i64>> = Vec::new();
    let mut aired: Vec<String> = Vec::new();
    let mut statuses: Vec<String> = Vec::new();

    for i in 0..n_rows {
        // Roughly one row in a hundred has no name and will be rejected.
        names.push((i % 97 != 13).then(|| title(&mut rng)));

        let n_genres = 1 + rng.below(3);
        let mut picked: Vec<&str> = Vec::new();
        while picked.len() < n_genres {
            let g = GENRES[rng.below(GENRES.len())];
            if !picked.contains(&g) {
                picked.push(g);
            }
        }
        let genre_bias = if picked.contains(&"Drama") { 0.4 } else { 0.0 };
        genres.push(picked.join(", "));

        scores.push((i % 53 != 7).then(|| (rng.gauss(6.8 + genre_bias, 0.9)).clamp(1.0, 9.9)));

        let mut roll = rng.unit();
        let status = STATUSES
            .iter()
            .find(|(_, p)| {
                roll -= p;
                roll < 0.0
            })
            .map(|(s, _)| *s)
            .unwrap_or("Finished Airing");
        statuses.push(status.to_string());

        let start = 1965 + rng.below(59) as i32;
        let span = if rng.unit() < 0.7 { 0 } else { 1 + rng.below(4) as i32 };
        let end = (start + span).min(2024);
        aired.push(match (i % 41, status) {
            (5, _) => "Not available".to_string(),
            (_, "Currently Airing") => format!("{} to ?", date(&mut rng, start)),
            _ if span == 0 => date(&mut rng, start),
            _ => format!("{} to {}", date(&mut rng, start), date(&mut rng, end)),
        });

        let cour = [12i64, 13, 24, 26, 50, 74, 148, 366, 1100][rng.below(9)];
        episodes.push((status != "Not yet aired").then_some(cour));

        synopses.push((i % 5 != 0).then(|| format!("Sample entry {i}.")));
    }

    let schema = Arc::new(Schema::new(vec![
        Field::new("Name", DataType::Utf8, true),
        Field::new("Score", DataType::Float64, true),
        Field::new("Genres", DataType::Utf8, false),
        Field::new("Synopsis", DataType::Utf8, true),
        Field::new("Episodes", DataType::Int64, true),
        Field::new("Aired", DataType::Utf8, false),
        Field::new("Status", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(names)),
            Arc::new(Float64Array::from(scores)),
            Arc::new(StringArray::from(genres)),
            Arc::new(StringArray::from(synopses)),
            Arc::new(Int64Array::from(episodes)),
            Arc::new(StringArray::from(aired)),
            Arc::new(StringArray::from(statuses)),
        ],
    )
    .expect("Failed to create RecordBatch");

    // Write Parquet
    let output_path = "sample_catalog.parquet";
    let file = std::fs::File::create(output_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    println!("Wrote {n_rows} catalog rows to {output_path}");
}
