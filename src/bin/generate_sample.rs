use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const ROWS: usize = 5000;

const SEX: [&str; 2] = ["Hombre", "Mujer"];
const YES_NO: [&str; 2] = ["No", "Si"];
const GENERAL_HEALTH: [&str; 5] = ["Excelente", "Muy buena", "Buena", "Regular", "Mala"];

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// One synthetic respondent.
struct Respondent {
    diabetes: i64,
    bmi: f64,
    high_blood_pressure: &'static str,
    smoker: &'static str,
    physical_activity: &'static str,
    general_health: &'static str,
    physical_days: i64,
    mental_days: i64,
    sleep_hours: f64,
    age: i64,
    sex: &'static str,
}

fn respondent(rng: &mut SimpleRng) -> Respondent {
    let age = rng.gauss(52.0, 15.0).clamp(18.0, 90.0).round() as i64;
    let bmi = rng.gauss(28.0, 5.5).clamp(14.0, 70.0);
    let active = rng.chance(0.7);
    let hypertension = rng.chance(0.2 + (age as f64 - 18.0) / 150.0);

    // Logistic risk in BMI, age, blood pressure and inactivity.
    let logit = -7.0
        + 0.12 * bmi
        + 0.035 * age as f64
        + if hypertension { 0.8 } else { 0.0 }
        + if active { 0.0 } else { 0.4 };
    let diabetic = rng.chance(1.0 / (1.0 + (-logit).exp()));

    let health_shift = if diabetic { 1.5 } else { 0.0 } + if active { 0.0 } else { 0.7 };
    let health_idx = rng.gauss(1.6 + health_shift, 1.0).round().clamp(0.0, 4.0) as usize;

    let days = |rng: &mut SimpleRng, mean: f64| -> i64 {
        if rng.chance(0.6) {
            0
        } else {
            rng.gauss(mean, mean * 0.8).clamp(1.0, 30.0).round() as i64
        }
    };

    Respondent {
        diabetes: i64::from(diabetic),
        bmi: (bmi * 10.0).round() / 10.0,
        high_blood_pressure: YES_NO[usize::from(hypertension)],
        smoker: YES_NO[usize::from(rng.chance(0.42))],
        physical_activity: YES_NO[usize::from(active)],
        general_health: GENERAL_HEALTH[health_idx],
        physical_days: days(rng, if diabetic { 12.0 } else { 6.0 }),
        mental_days: days(rng, 7.0),
        sleep_hours: rng.gauss(7.0, 1.3).clamp(3.0, 12.0).round(),
        age,
        sex: SEX[usize::from(rng.chance(0.55))],
    }
}

const HEADERS: [&str; 11] = [
    "diabetes",
    "bmi",
    "presion_alta",
    "fumador",
    "actividad_fisica",
    "salud_general",
    "dias_salud_fisica",
    "dias_salud_mental",
    "horas_sueño",
    "edad",
    "sexo",
];

fn write_csv(path: &str, rows: &[Respondent]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record(HEADERS)?;
    for r in rows {
        writer.write_record([
            r.diabetes.to_string(),
            r.bmi.to_string(),
            r.high_blood_pressure.to_string(),
            r.smoker.to_string(),
            r.physical_activity.to_string(),
            r.general_health.to_string(),
            r.physical_days.to_string(),
            r.mental_days.to_string(),
            r.sleep_hours.to_string(),
            r.age.to_string(),
            r.sex.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &str, rows: &[Respondent]) -> Result<()> {
    let ints = |f: fn(&Respondent) -> i64| -> ArrayRef {
        Arc::new(Int64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
    };
    let floats = |f: fn(&Respondent) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
    };
    let strings = |f: fn(&Respondent) -> &'static str| -> ArrayRef {
        Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
    };

    let columns: Vec<ArrayRef> = vec![
        ints(|r| r.diabetes),
        floats(|r| r.bmi),
        strings(|r| r.high_blood_pressure),
        strings(|r| r.smoker),
        strings(|r| r.physical_activity),
        strings(|r| r.general_health),
        ints(|r| r.physical_days),
        ints(|r| r.mental_days),
        floats(|r| r.sleep_hours),
        ints(|r| r.age),
        strings(|r| r.sex),
    ];

    let schema = Arc::new(Schema::new(
        HEADERS
            .iter()
            .zip(&columns)
            .map(|(name, col)| Field::new(*name, col.data_type().clone(), false))
            .collect::<Vec<_>>(),
    ));
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;
    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows: Vec<Respondent> = (0..ROWS).map(|_| respondent(&mut rng)).collect();
    let positives = rows.iter().filter(|r| r.diabetes == 1).count();

    write_csv("df_limpio.csv", &rows)?;
    write_parquet("df_limpio.parquet", &rows)?;

    println!(
        "Wrote {ROWS} respondents ({positives} with diabetes) to df_limpio.csv and df_limpio.parquet"
    );
    Ok(())
}
