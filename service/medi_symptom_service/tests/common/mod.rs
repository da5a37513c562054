use std::collections::HashMap;
use std::fs::{create_dir_all, write};
use std::path::Path;

use medi_classifier::{Activation, DenseLayer, LabelSet, MlpPipeline, StandardScaler};
use medi_symptom_service::SymptomChecker;
use medi_symptoms::{DiseaseInfo, SeverityTable, SymptomTables, Vocabulary};

pub const SYMPTOMS: [&str; 6] = [
    "itching",
    "skin_rash",
    "nodal_skin_eruptions",
    "chest_pain",
    "breathlessness",
    "continuous_sneezing",
];

pub const WEIGHTS: [(&str, f64); 5] = [
    ("itching", 1.0),
    ("skin_rash", 3.0),
    ("nodal_skin_eruptions", 4.0),
    ("chest_pain", 7.0),
    ("breathlessness", 4.0),
];

pub const LABELS: [&str; 3] = ["Allergy", "Fungal infection", "Heart attack"];

/// One-layer softmax: skin symptoms vote for fungal infection, cardiac ones
/// for heart attack, sneezing for allergy.
fn weights() -> Vec<Vec<f64>> {
    vec![
        vec![0.2, 0.8, 0.0],
        vec![0.1, 0.9, 0.0],
        vec![0.0, 1.0, 0.0],
        vec![0.0, 0.0, 1.0],
        vec![0.1, 0.0, 0.8],
        vec![1.5, 0.0, 0.0],
    ]
}

fn disease_info() -> DiseaseInfo {
    DiseaseInfo {
        description: HashMap::from([(
            "Fungal infection".to_string(),
            "A fungal infection of the skin.".to_string(),
        )]),
        precautions: HashMap::from([(
            "Fungal infection".to_string(),
            vec!["bath twice".to_string(), "keep infected area dry".to_string()],
        )]),
    }
}

pub fn tables() -> SymptomTables {
    SymptomTables {
        vocab: Vocabulary::new(SYMPTOMS).expect("vocab"),
        severity: SeverityTable::new(WEIGHTS).expect("severity"),
        disease_info: disease_info(),
    }
}

pub fn labels() -> LabelSet {
    LabelSet::new(LABELS.iter().map(|s| s.to_string()).collect()).expect("labels")
}

pub fn checker() -> SymptomChecker {
    let model = MlpPipeline::new(
        StandardScaler::identity(SYMPTOMS.len()),
        Activation::Relu,
        vec![DenseLayer {
            weights: weights(),
            biases: vec![0.0; LABELS.len()],
        }],
    )
    .expect("pipeline");
    SymptomChecker::new(tables(), labels(), Box::new(model)).expect("checker")
}

/// Write the same fixture in the on-disk artifact layout
#[allow(dead_code)]
pub fn write_artifacts(root: &Path) {
    let processed = root.join("data").join("processed");
    let models = root.join("models");
    create_dir_all(&processed).expect("mkdir processed");
    create_dir_all(&models).expect("mkdir models");

    let mut vocab = String::from("symptom\n");
    for s in SYMPTOMS {
        vocab.push_str(s);
        vocab.push('\n');
    }
    write(processed.join("symptom_vocab.csv"), vocab).expect("write vocab");

    let mut severity = String::from("symptom,weight\n");
    for (s, w) in WEIGHTS {
        severity.push_str(&format!("{s},{w}\n"));
    }
    write(processed.join("severity_weights.csv"), severity).expect("write severity");

    write(
        processed.join("disease_info.json"),
        serde_json::to_string(&disease_info()).expect("info json"),
    )
    .expect("write info");

    write(
        models.join("label_encoder.json"),
        serde_json::json!({ "classes": LABELS }).to_string(),
    )
    .expect("write labels");

    let pipeline = serde_json::json!({
        "scaler": { "scale": vec![1.0; SYMPTOMS.len()] },
        "activation": "relu",
        "layers": [{ "weights": weights(), "biases": vec![0.0; LABELS.len()] }],
    });
    write(models.join("ann_pipeline.json"), pipeline.to_string()).expect("write pipeline");
}
