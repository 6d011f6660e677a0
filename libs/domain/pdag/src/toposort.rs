// [libs/domain/pdag/src/toposort.rs]
/*!
 * =================================================================
 * APARATO: LAYERED TOPOLOGICAL ORDER (V6.3 - SOBERANO)
 * CLASIFICACIÓN: DOMAIN ALGORITHM (ESTRATO L2)
 * RESPONSABILIDAD: ASIGNACIÓN DE ÓRDENES POR CAPAS AL PDAG
 *
 * # Mathematical Proof (Strict Layering):
 * order(variable) = 0; order(compuerta) = 1 + max(order(argumentos)).
 * Por inducción, el orden de todo argumento es estrictamente menor que
 * el de su compuerta, de modo que agrupar por orden produce olas cuyos
 * nodos solo dependen de olas estrictamente anteriores.
 * =================================================================
 */

use std::collections::HashMap;

use tracing::debug;

use crate::errors::PdagError;
use crate::node::{Node, Pdag};

/// Marca del recorrido en profundidad.
#[derive(Clone, Copy, PartialEq)]
enum VisitState {
    OnStack,
    Finished,
}

/// Asigna a cada nodo alcanzable desde la raíz su orden por capas.
///
/// Todo argumento recibe un orden estrictamente menor que el de la
/// compuerta que lo consume. Falla con un error de consistencia ante
/// argumentos desconocidos o ciclos.
pub fn layered_topological_order(pdag: &mut Pdag) -> Result<(), PdagError> {
    let mut orders: HashMap<i32, u32> = HashMap::new();
    let mut states: HashMap<i32, VisitState> = HashMap::new();

    assign_order(pdag, pdag.root_index(), &mut orders, &mut states)?;

    let max_order = orders.values().copied().max().unwrap_or(0);
    for (index, order) in &orders {
        if let Some(node) = pdag.node_mut(*index) {
            node.set_order(*order);
        }
    }

    debug!(
        "🧭 [LAYERED_ORDER]: {} nodos ordenados en {} capas",
        orders.len(),
        max_order + 1
    );
    Ok(())
}

/// DFS post-orden iterativo-recursivo con detección de ciclos.
fn assign_order(
    pdag: &Pdag,
    index: i32,
    orders: &mut HashMap<i32, u32>,
    states: &mut HashMap<i32, VisitState>,
) -> Result<u32, PdagError> {
    if let Some(order) = orders.get(&index) {
        return Ok(*order);
    }
    if states.get(&index) == Some(&VisitState::OnStack) {
        return Err(PdagError::CycleDetected(index));
    }

    let node = pdag.node(index).ok_or(PdagError::UnknownArgument {
        gate_index: index,
        argument_index: index,
    })?;

    let order = match node {
        Node::Variable(_) => 0,
        Node::Gate(gate) => {
            states.insert(index, VisitState::OnStack);
            let mut deepest_argument = 0u32;
            for (_negated, argument_index) in gate.arg_pairs() {
                if pdag.node(argument_index).is_none() {
                    return Err(PdagError::UnknownArgument {
                        gate_index: index,
                        argument_index,
                    });
                }
                let argument_order = assign_order(pdag, argument_index, orders, states)?;
                deepest_argument = deepest_argument.max(argument_order);
            }
            deepest_argument + 1
        }
    };

    states.insert(index, VisitState::Finished);
    orders.insert(index, order);
    Ok(order)
}
