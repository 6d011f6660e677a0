// [tests/mirror/libs/domain/simulation/layer_planner_waves.test.rs]
/**
 * =================================================================
 * APARATO: CERTIFICADOR DEL PLANIFICADOR DE OLAS (V6.0)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L2-SIMULATION
 * RESPONSABILIDAD: INVARIANTE DE OLA ESTRICTA Y PARTICIÓN ESTABLE
 *
 * # Mathematical Proof (Strict Wave Invariant):
 * Para toda ola w y toda compuerta g en w, cada insumo de g pertenece
 * a una ola con índice estrictamente menor que w. El certificador
 * reconstruye el mapa nodo->ola y audita cada arco.
 * =================================================================
 */

use std::collections::HashMap;

use arbol_domain_pdag::{Connective, Node, Pdag, PdagError};
use arbol_domain_simulation::prelude::{plan_waves, Wave};

/// Modelo de referencia de dos capas con conectivas mezcladas.
fn mixed_connective_model() -> Pdag {
    Pdag::builder()
        .basic_event(1, 0.1)
        .basic_event(2, 0.2)
        .basic_event(3, 0.3)
        .basic_event(4, 0.4)
        .gate(20, Connective::Or, vec![1, 2])
        .gate(21, Connective::And, vec![2, 3])
        .gate(22, Connective::Xor, vec![3, 4])
        .gate(30, Connective::Atleast, vec![20, 21, 22])
        .root(30)
        .build()
        .unwrap()
}

/// Reconstruye el índice de ola de cada nodo planificado.
fn wave_index_by_node(waves: &[Wave]) -> HashMap<i32, usize> {
    let mut index_by_node = HashMap::new();
    for (wave_position, wave) in waves.iter().enumerate() {
        for &variable in &wave.variables {
            index_by_node.insert(variable, wave_position);
        }
        for (_connective, gates) in &wave.gates_by_connective {
            for &gate in gates {
                index_by_node.insert(gate, wave_position);
            }
        }
    }
    index_by_node
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_insumo_vive_en_una_ola_estrictamente_anterior() {
        println!("🔬 [WAVES]: Auditando la invariante de ola estricta...");
        let mut pdag = mixed_connective_model();
        let waves = plan_waves(&mut pdag).unwrap();
        let wave_of = wave_index_by_node(&waves);

        let mut audited_arcs = 0usize;
        for node in pdag.nodes() {
            if let Node::Gate(gate) = node {
                let gate_wave = wave_of[&gate.index];
                for (_negated, argument_index) in gate.arg_pairs() {
                    let argument_wave = wave_of[&argument_index];
                    assert!(
                        argument_wave < gate_wave,
                        "insumo {argument_index} (ola {argument_wave}) no precede a la compuerta {} (ola {gate_wave})",
                        gate.index
                    );
                    audited_arcs += 1;
                }
            }
        }
        println!("      ✅ [WAVES]: {audited_arcs} arcos auditados");
    }

    #[test]
    fn las_variables_preceden_a_las_compuertas_en_cada_ola() {
        let mut pdag = mixed_connective_model();
        let waves = plan_waves(&mut pdag).unwrap();

        assert_eq!(waves[0].variables, vec![1, 2, 3, 4]);
        assert!(waves[0].gates_by_connective.is_empty());
        assert!(waves[1].variables.is_empty());
        assert!(waves[2].variables.is_empty());
    }

    #[test]
    fn las_compuertas_se_agrupan_por_codigo_de_conectiva() {
        let mut pdag = mixed_connective_model();
        let waves = plan_waves(&mut pdag).unwrap();

        let middle_wave: Vec<(Connective, Vec<i32>)> = waves[1].gates_by_connective.clone();
        assert_eq!(
            middle_wave,
            vec![
                (Connective::And, vec![21]),
                (Connective::Or, vec![20]),
                (Connective::Xor, vec![22]),
            ]
        );

        assert_eq!(
            waves[2].gates_by_connective,
            vec![(Connective::Atleast, vec![30])]
        );
    }

    #[test]
    fn la_planificacion_es_determinista_entre_ejecuciones() {
        let mut first_model = mixed_connective_model();
        let mut second_model = mixed_connective_model();

        let first_plan = plan_waves(&mut first_model).unwrap();
        let second_plan = plan_waves(&mut second_model).unwrap();

        assert_eq!(first_plan, second_plan);
    }

    #[test]
    fn las_conectivas_sin_kernel_abortan_la_planificacion() {
        for orphan_connective in [Connective::Iff, Connective::Imply, Connective::Cardinality] {
            let mut pdag = Pdag::builder()
                .basic_event(1, 0.5)
                .basic_event(2, 0.5)
                .gate(3, orphan_connective, vec![1, 2])
                .root(3)
                .build()
                .unwrap();

            let fault = plan_waves(&mut pdag).unwrap_err();
            println!("      🛑 [REJECT]: {fault}");
            assert!(matches!(fault, PdagError::UnsupportedConnective { .. }));
        }
    }
}
