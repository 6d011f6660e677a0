// [tests/mirror/libs/domain/pdag/layered_order.test.rs]
/**
 * =================================================================
 * APARATO: CERTIFICADOR DEL ORDEN POR CAPAS (V5.0 - SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L2-PDAG
 * RESPONSABILIDAD: ESTRICTA MONOTONÍA DEL ORDEN TOPOLÓGICO
 *
 * # Mathematical Proof (Strict Layering):
 * Para todo arco (argumento -> compuerta) del grafo alcanzable,
 * order(argumento) < order(compuerta). El certificador recorre cada
 * arco del modelo y verifica la desigualdad estricta.
 * =================================================================
 */

use arbol_domain_pdag::{layered_topological_order, Connective, Node, Pdag, PdagError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_arco_respeta_la_desigualdad_estricta() {
        println!("🔬 [ORDER]: Certificando desigualdad estricta por arco...");
        let mut pdag = Pdag::builder()
            .basic_event(1, 0.1)
            .basic_event(2, 0.2)
            .basic_event(3, 0.3)
            .basic_event(4, 0.4)
            .gate(10, Connective::Or, vec![1, 2])
            .gate(11, Connective::And, vec![2, 3])
            .gate(12, Connective::Atleast, vec![10, 11, 4])
            .root(12)
            .build()
            .unwrap();

        layered_topological_order(&mut pdag).unwrap();

        let mut audited_arcs = 0usize;
        for node in pdag.nodes() {
            if let Node::Gate(gate) = node {
                for (_negated, argument_index) in gate.arg_pairs() {
                    let argument_order = pdag.node(argument_index).unwrap().order();
                    assert!(
                        argument_order < node.order(),
                        "arco ({argument_index} -> {}) viola la capa",
                        gate.index
                    );
                    audited_arcs += 1;
                }
            }
        }
        println!("      ✅ [ORDER]: {audited_arcs} arcos auditados sin violaciones");
    }

    #[test]
    fn el_diamante_comparte_capa_sin_romper_la_ley() {
        let mut pdag = Pdag::builder()
            .basic_event(1, 0.5)
            .gate(2, Connective::Null, vec![1])
            .gate(3, Connective::Not, vec![1])
            .gate(4, Connective::And, vec![2, 3])
            .root(4)
            .build()
            .unwrap();

        layered_topological_order(&mut pdag).unwrap();

        assert_eq!(pdag.node(1).unwrap().order(), 0);
        assert_eq!(pdag.node(2).unwrap().order(), 1);
        assert_eq!(pdag.node(3).unwrap().order(), 1);
        assert_eq!(pdag.node(4).unwrap().order(), 2);
    }

    #[test]
    fn las_profundidades_dispares_toman_el_camino_mas_largo() {
        let mut pdag = Pdag::builder()
            .basic_event(1, 0.5)
            .basic_event(2, 0.5)
            .gate(3, Connective::Or, vec![1, 2])
            .gate(4, Connective::And, vec![3, 1])
            .root(4)
            .build()
            .unwrap();

        layered_topological_order(&mut pdag).unwrap();
        // El nodo 4 consume al 1 (capa 0) y al 3 (capa 1): capa 2.
        assert_eq!(pdag.node(4).unwrap().order(), 2);
    }

    #[test]
    fn un_ciclo_es_un_fallo_de_consistencia() {
        let mut pdag = Pdag::builder()
            .basic_event(1, 0.5)
            .gate(2, Connective::Or, vec![1, 3])
            .gate(3, Connective::And, vec![2, 1])
            .root(3)
            .build()
            .unwrap();

        let fault = layered_topological_order(&mut pdag).unwrap_err();
        println!("      🛑 [CYCLE]: {fault}");
        assert!(matches!(fault, PdagError::CycleDetected(_)));
    }

    #[test]
    fn un_argumento_fantasma_es_fatal() {
        let mut pdag = Pdag::builder()
            .basic_event(1, 0.5)
            .gate(2, Connective::Or, vec![1, 77])
            .root(2)
            .build()
            .unwrap();

        let fault = layered_topological_order(&mut pdag).unwrap_err();
        assert_eq!(
            fault,
            PdagError::UnknownArgument {
                gate_index: 2,
                argument_index: 77
            }
        );
    }
}
