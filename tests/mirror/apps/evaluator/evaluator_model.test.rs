// [tests/mirror/apps/evaluator/evaluator_model.test.rs]
/**
 * =================================================================
 * APARATO: CERTIFICADOR DE INGESTA DEL TASADOR (V4.0)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L3-APPLICATION
 * RESPONSABILIDAD: CICLO COMPLETO MODELO JSON -> MISIÓN -> REPORTE
 * =================================================================
 */

use std::fs;

use arbol_evaluator_lib::{
    run_mission, write_report, BasicEventModel, GateModel, MissionModel, MissionParameters,
};
use arbol_domain_pdag::Connective;

/// Modelo determinista: AND(e1, e2) con p=1.0 exactas.
fn deterministic_mission() -> MissionModel {
    MissionModel {
        root: 10,
        basic_events: vec![
            BasicEventModel { index: 1, probability: 1.0 },
            BasicEventModel { index: 2, probability: 1.0 },
        ],
        gates: vec![GateModel {
            index: 10,
            connective: Connective::And,
            args: vec![1, 2],
            min_number: 0,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn la_ingesta_decodifica_el_contrato_json() {
        println!("🔬 [INGESTA]: Decodificando el modelo de misión...");
        let temp_directory = tempfile::tempdir().unwrap();
        let model_path = temp_directory.path().join("mission.json");

        let raw_model = r#"{
            "root": 7,
            "basic_events": [
                { "index": 1, "probability": 0.25 },
                { "index": 2, "probability": 0.5 }
            ],
            "gates": [
                { "index": 7, "connective": "atleast", "args": [1, -2], "min_number": 1 }
            ]
        }"#;
        fs::write(&model_path, raw_model).unwrap();

        let model = MissionModel::load_from_file(&model_path).unwrap();
        assert_eq!(model.root, 7);
        assert_eq!(model.basic_events.len(), 2);
        assert_eq!(model.gates[0].connective, Connective::Atleast);
        assert_eq!(model.gates[0].args, vec![1, -2]);

        let pdag = model.into_pdag().unwrap();
        assert_eq!(pdag.root_index(), 7);
        assert_eq!(pdag.num_nodes(), 3);
    }

    #[test]
    fn un_modelo_malformado_es_rechazado_con_contexto() {
        let temp_directory = tempfile::tempdir().unwrap();
        let model_path = temp_directory.path().join("broken.json");
        fs::write(&model_path, "{ esto no es json }").unwrap();

        let verdict = MissionModel::load_from_file(&model_path);
        assert!(verdict.is_err());
    }

    #[test]
    fn la_mision_determinista_sella_un_reporte_saturado() {
        println!("🔬 [MISSION]: AND determinista de punta a punta...");
        let parameters = MissionParameters {
            batch_size: 4,
            bitpacks_per_batch: 32,
            iterations: 2,
            bitpack_width_bits: 64,
        };

        let report = run_mission(deterministic_mission(), parameters).unwrap();

        println!(
            "      🏁 [REPORT]: run={} mean={} bits={}",
            report.run_identifier, report.tally.mean, report.total_sampled_bits
        );
        assert_eq!(report.root_index, 10);
        assert_eq!(report.tally.mean, 1.0);
        assert_eq!(report.tally.num_one_bits, report.total_sampled_bits);
        assert_eq!(report.num_waves, 2);
        assert!(report.finished_at >= report.started_at);
    }

    #[test]
    fn el_reporte_persistido_es_json_valido() {
        let parameters = MissionParameters {
            batch_size: 2,
            bitpacks_per_batch: 16,
            iterations: 1,
            bitpack_width_bits: 64,
        };
        let report = run_mission(deterministic_mission(), parameters).unwrap();

        let temp_directory = tempfile::tempdir().unwrap();
        let report_path = temp_directory.path().join("report.json");
        write_report(&report, &report_path).unwrap();

        let raw_report = fs::read_to_string(&report_path).unwrap();
        let decoded: serde_json::Value = serde_json::from_str(&raw_report).unwrap();
        assert_eq!(decoded["root_index"], 10);
        assert_eq!(decoded["tally"]["mean"], 1.0);
    }
}
