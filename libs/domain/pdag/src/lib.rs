// [libs/domain/pdag/src/lib.rs]
/*!
 * =================================================================
 * APARATO: PDAG DOMAIN HUB (V9.0 - PRODUCTION MASTER)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: CONTRATOS SOBERANOS DEL GRAFO DE PROPAGACIÓN
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. INDEX SOVEREIGNTY: Cada nodo porta un índice entero estable; los
 *    argumentos son índices con signo, donde el negativo denota la
 *    negación lógica del hijo referenciado.
 * 2. LAYERED ORDER: El orden topológico por capas asigna a cada nodo
 *    un entero estrictamente mayor que el de todos sus argumentos.
 * 3. FAIL FAST: Duplicados, aridades inválidas y conectivas sin kernel
 *    se rechazan en la construcción o en la planificación, nunca en el
 *    hot-path de simulación.
 * =================================================================
 */

pub mod connective;
pub mod errors;
pub mod node;
pub mod toposort;

pub use connective::Connective;
pub use errors::PdagError;
pub use node::{BasicEvent, Expression, Gate, Node, Pdag, PdagBuilder, Variable};
pub use toposort::layered_topological_order;
