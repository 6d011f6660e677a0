// [libs/domain/simulation/src/layer_planner.rs]
/*!
 * =================================================================
 * APARATO: WAVE LAYER PLANNER (V10.1 - PRODUCTION MASTER)
 * CLASIFICACIÓN: DOMAIN SCHEDULING (ESTRATO L2)
 * RESPONSABILIDAD: OLAS DE EJECUCIÓN CON PARTICIÓN DETERMINISTA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. STRICT WAVES: Tras el orden topológico por capas, todo insumo de
 *    una compuerta pertenece a una ola estrictamente anterior.
 * 2. VARIABLES FIRST: Dentro de cada ola, las variables preceden a las
 *    compuertas para que el refresco de muestreo se emita antes que
 *    cualquier kernel de compuerta de la ola.
 * 3. HOMOGENEOUS BATCHES: Las compuertas se agrupan por código de
 *    conectiva; cada grupo alimenta un único kernel monomorfizado.
 * 4. EARLY REJECTION: Iff/Imply/Cardinality carecen de kernel y se
 *    rechazan aquí, nunca en el hot-path.
 * =================================================================
 */

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use arbol_domain_pdag::{layered_topological_order, Connective, Node, Pdag, PdagError};

/// Ola de ejecución: nodos del mismo orden topológico.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wave {
    /// Variables (eventos básicos) de la ola, por índice ascendente.
    pub variables: Vec<i32>,
    /// Compuertas agrupadas por conectiva, en orden de código estable;
    /// dentro de cada grupo, por índice ascendente.
    pub gates_by_connective: Vec<(Connective, Vec<i32>)>,
}

impl Wave {
    /// Número total de nodos de la ola.
    pub fn num_nodes(&self) -> usize {
        self.variables.len()
            + self
                .gates_by_connective
                .iter()
                .map(|(_, gates)| gates.len())
                .sum::<usize>()
    }
}

/// Planifica las olas de ejecución del PDAG.
///
/// Invoca el orden topológico por capas, recolecta los nodos
/// alcanzables desde la raíz verificando unicidad de índices, ordena
/// establemente por orden y particiona cada ola en variables más
/// compuertas por conectiva.
pub fn plan_waves(pdag: &mut Pdag) -> Result<Vec<Wave>, PdagError> {
    layered_topological_order(pdag)?;

    // Recolección de alcanzables desde la raíz con unicidad defensiva.
    let mut reachable: Vec<i32> = Vec::new();
    let mut visited: HashSet<i32> = HashSet::new();
    gather_reachable(pdag, pdag.root_index(), &mut reachable, &mut visited)?;

    // Orden estable por capa topológica.
    reachable.sort_by_key(|&index| {
        pdag.node(index)
            .map(|node| node.order())
            .unwrap_or(u32::MAX)
    });

    let deepest_order = reachable
        .last()
        .and_then(|&index| pdag.node(index))
        .map(|node| node.order())
        .unwrap_or(0);

    // Bucketing lineal por orden, con partición determinista por ola.
    let mut variables_by_order: Vec<Vec<i32>> = vec![Vec::new(); deepest_order as usize + 1];
    let mut gates_by_order: Vec<BTreeMap<Connective, Vec<i32>>> =
        vec![BTreeMap::new(); deepest_order as usize + 1];

    for &index in &reachable {
        let Some(node) = pdag.node(index) else {
            return Err(PdagError::UnknownArgument {
                gate_index: index,
                argument_index: index,
            });
        };
        let wave_order = node.order() as usize;

        match node {
            Node::Variable(_) => variables_by_order[wave_order].push(index),
            Node::Gate(gate) => {
                if !gate.connective.has_kernel() {
                    return Err(PdagError::UnsupportedConnective {
                        gate_index: index,
                        connective: gate.connective,
                    });
                }
                gates_by_order[wave_order]
                    .entry(gate.connective)
                    .or_default()
                    .push(index);
            }
        }
    }

    let mut waves: Vec<Wave> = Vec::with_capacity(deepest_order as usize + 1);
    for (mut variables, gate_groups) in variables_by_order.into_iter().zip(gates_by_order) {
        variables.sort_unstable();
        let gates_by_connective: Vec<(Connective, Vec<i32>)> = gate_groups
            .into_iter()
            .map(|(connective, mut gates)| {
                gates.sort_unstable();
                (connective, gates)
            })
            .collect();

        waves.push(Wave {
            variables,
            gates_by_connective,
        });
    }

    debug!("🌊 [WAVE_PLANNER]: num_nodes: {}", reachable.len());
    debug!("🌊 [WAVE_PLANNER]: num_layers: {}", waves.len());
    Ok(waves)
}

/// DFS de recolección desde la raíz con verificación de unicidad.
fn gather_reachable(
    pdag: &Pdag,
    index: i32,
    reachable: &mut Vec<i32>,
    visited: &mut HashSet<i32>,
) -> Result<(), PdagError> {
    // La unicidad de índices queda sellada por el constructor del
    // PDAG; aquí el set de visitados evita recorridos repetidos.
    if !visited.insert(index) {
        return Ok(());
    }
    reachable.push(index);

    if let Some(Node::Gate(gate)) = pdag.node(index) {
        for (_negated, argument_index) in gate.arg_pairs() {
            if pdag.node(argument_index).is_none() {
                return Err(PdagError::UnknownArgument {
                    gate_index: index,
                    argument_index,
                });
            }
            gather_reachable(pdag, argument_index, reachable, visited)?;
        }
    }
    Ok(())
}
