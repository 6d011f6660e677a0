// [libs/domain/simulation/src/queue/builder.rs]
/*!
 * =================================================================
 * APARATO: KERNEL QUEUE BUILDER (V13.4 - SWISS WATCH SEAL)
 * CLASIFICACIÓN: DOMAIN SCHEDULING (ESTRATO L2)
 * RESPONSABILIDAD: CONSTRUCCIÓN DE UNIDADES POR OLA Y CONECTIVA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ONE KERNEL PER (WAVE, CONNECTIVE): Cada ola emite un kernel de
 *    muestreo para sus variables y un kernel monomorfizado por cada
 *    conectiva presente; el despacho se decide una única vez aquí.
 * 2. DEPENDENCY UNION: Las dependencias de una unidad son la unión de
 *    las unidades propietarias de cada buffer que lee.
 * 3. FATAL LOOKUPS: Toda referencia a un nodo sin unidad registrada
 *    es un fallo de consistencia fatal en construcción, con el índice
 *    del ofensor en el mensaje.
 * =================================================================
 */

use std::collections::{BTreeSet, HashMap};

use tracing::error;

use arbol_core_device::profile::DeviceProfile;
use arbol_core_device::range::Range3;
use arbol_core_device::working_set::WorkingSet;
use arbol_core_sampling::bitpack::Bitpack;
use arbol_core_sampling::shape::SampleShape;
use arbol_domain_pdag::{Connective, Node, Pdag};

use crate::buffers::{BufferArena, BufferId};
use crate::errors::SimulationError;
use crate::kernels::{
    AndFold, AtleastKernel, BasicEventKernel, GateKernel, NandFold, NorFold, NotFold, NullFold,
    OrFold, TallyKernel, XorFold,
};
use crate::layer_planner::Wave;
use crate::queue::queueable::{AtleastUnit, GateUnit, Queueable, SampleUnit, TallyUnit};
use crate::records::{AtleastGateRecord, BasicEventRecord, GateRecord, TallyEvent};

/// Estado mutable de la construcción de la cola.
pub struct QueueBuildState<B: Bitpack> {
    pub arena: BufferArena<B>,
    pub units: Vec<Box<dyn Queueable<B>>>,
    pub unit_by_node: HashMap<i32, usize>,
    pub buffer_by_node: HashMap<i32, BufferId>,
    /// (índice de unidad de tally, slot del registro en su lote).
    pub tally_locator: HashMap<i32, (usize, usize)>,
    pub shape: SampleShape,
    pub profile: DeviceProfile,
}

impl<B: Bitpack> QueueBuildState<B> {
    pub fn new(shape: SampleShape, profile: DeviceProfile) -> Self {
        Self {
            arena: BufferArena::new(shape.num_bitpacks()),
            units: Vec::new(),
            unit_by_node: HashMap::new(),
            buffer_by_node: HashMap::new(),
            tally_locator: HashMap::new(),
            shape,
            profile,
        }
    }

    /// Registra una unidad nueva y retorna su índice en la cola.
    fn push_unit(&mut self, unit: Box<dyn Queueable<B>>) -> usize {
        self.units.push(unit);
        self.units.len() - 1
    }
}

/// Construye el kernel de muestreo de las variables de una ola.
pub fn build_kernel_for_variables<B: Bitpack>(
    state: &mut QueueBuildState<B>,
    pdag: &Pdag,
    variables: &[i32],
) -> Result<Option<usize>, SimulationError> {
    if variables.is_empty() {
        return Ok(None);
    }

    // 1. Recolección de índices y probabilidades de los eventos.
    let mut records = Vec::with_capacity(variables.len());
    let first_slot = state.arena.allocate_contiguous(variables.len());

    for (slot_offset, &node_index) in variables.iter().enumerate() {
        let basic_event = pdag.basic_event(node_index).ok_or_else(|| {
            error!("Unknown BasicEvent {node_index} while building sampler kernel");
            SimulationError::UnknownBasicEvent {
                gate_index: node_index,
                argument_index: node_index,
            }
        })?;

        records.push(BasicEventRecord {
            node_index,
            probability: basic_event.probability(),
            buffer: BufferId(first_slot.0 + slot_offset),
        });
    }

    // 2. Negociación de la forma local y el rango ND del kernel.
    let working_set = WorkingSet::<B>::new(&state.profile, records.len(), state.shape);
    let local_range = working_set.local_range(Range3::unbounded());
    let nd_range = working_set.nd_range(local_range);

    // 3. Registro de la unidad iterable y de los mapas de identidad.
    let kernel = BasicEventKernel::new(records, state.shape, nd_range);
    let unit_index = state.push_unit(Box::new(SampleUnit::new(kernel, first_slot)));

    for (slot_offset, &node_index) in variables.iter().enumerate() {
        state.buffer_by_node.insert(node_index, BufferId(first_slot.0 + slot_offset));
        state.unit_by_node.insert(node_index, unit_index);
    }

    Ok(Some(unit_index))
}

/// Insumos de una compuerta: buffers particionados y dependencias.
struct GateInputs {
    inputs: Vec<BufferId>,
    negated_inputs_offset: usize,
    min_number: u16,
}

/// Resuelve los insumos de una compuerta contra los mapas de la cola.
fn gather_gate_inputs<B: Bitpack>(
    state: &QueueBuildState<B>,
    pdag: &Pdag,
    gate_index: i32,
    dependencies: &mut BTreeSet<usize>,
) -> Result<GateInputs, SimulationError> {
    let Some(Node::Gate(gate)) = pdag.node(gate_index) else {
        return Err(SimulationError::UnknownGate {
            gate_index,
            argument_index: gate_index,
        });
    };

    let mut positive_inputs: Vec<BufferId> = Vec::with_capacity(gate.num_inputs());
    let mut negated_inputs: Vec<BufferId> = Vec::new();

    for (is_negated, argument_index) in gate.arg_pairs() {
        let Some(&buffer) = state.buffer_by_node.get(&argument_index) else {
            // El tipo del ofensor decide el mensaje, como exige el
            // contrato de fallos de construcción.
            return Err(match pdag.node(argument_index) {
                Some(Node::Variable(_)) => {
                    error!("Unknown BasicEvent {argument_index} in gate {gate_index}");
                    SimulationError::UnknownBasicEvent {
                        gate_index,
                        argument_index,
                    }
                }
                _ => {
                    error!("Unknown Gate {argument_index} in gate {gate_index}");
                    SimulationError::UnknownGate {
                        gate_index,
                        argument_index,
                    }
                }
            });
        };

        let owner_unit = state.unit_by_node[&argument_index];
        dependencies.insert(owner_unit);

        if is_negated {
            negated_inputs.push(buffer);
        } else {
            positive_inputs.push(buffer);
        }
    }

    // Positivos primero; el offset marca el inicio de los negados.
    let negated_inputs_offset = positive_inputs.len();
    positive_inputs.extend(negated_inputs);

    // El contador por posición de bit del kernel K-de-N es u16.
    if gate.connective == Connective::Atleast && positive_inputs.len() > u16::MAX as usize {
        return Err(SimulationError::AtleastCounterOverflow {
            gate_index,
            num_inputs: positive_inputs.len(),
        });
    }

    Ok(GateInputs {
        inputs: positive_inputs,
        negated_inputs_offset,
        min_number: gate.min_number,
    })
}

/// Construye el kernel de todas las compuertas de una conectiva en la
/// ola. El despacho por conectiva se monomorfiza aquí, una sola vez.
pub fn build_kernel_for_gates_of_connective<B: Bitpack>(
    state: &mut QueueBuildState<B>,
    pdag: &Pdag,
    connective: Connective,
    gate_indices: &[i32],
) -> Result<Option<usize>, SimulationError> {
    if gate_indices.is_empty() {
        return Ok(None);
    }

    // 1. Recolección de insumos y dependencias de la ola.
    let mut dependencies: BTreeSet<usize> = BTreeSet::new();
    let mut gathered: Vec<GateInputs> = Vec::with_capacity(gate_indices.len());
    for &gate_index in gate_indices {
        gathered.push(gather_gate_inputs(state, pdag, gate_index, &mut dependencies)?);
    }

    // 2. Reserva contigua de los buffers de salida del lote.
    let first_slot = state.arena.allocate_contiguous(gate_indices.len());
    let gate_records: Vec<GateRecord> = gate_indices
        .iter()
        .zip(gathered.iter())
        .enumerate()
        .map(|(slot_offset, (&node_index, inputs))| GateRecord {
            node_index,
            inputs: inputs.inputs.clone(),
            negated_inputs_offset: inputs.negated_inputs_offset,
            buffer: BufferId(first_slot.0 + slot_offset),
        })
        .collect();

    // 3. Forma local y rango ND para el lote homogéneo.
    let working_set = WorkingSet::<B>::new(&state.profile, gate_records.len(), state.shape);
    let local_range = working_set.local_range(Range3::unbounded());
    let nd_range = working_set.nd_range(local_range);
    let dependency_list: Vec<usize> = dependencies.into_iter().collect();

    // 4. Despacho monomorfizado por conectiva.
    let unit_index = match connective {
        Connective::And => state.push_unit(Box::new(GateUnit::new(
            GateKernel::<B, AndFold>::new(gate_records, state.shape, nd_range),
            first_slot,
            dependency_list,
        ))),
        Connective::Or => state.push_unit(Box::new(GateUnit::new(
            GateKernel::<B, OrFold>::new(gate_records, state.shape, nd_range),
            first_slot,
            dependency_list,
        ))),
        Connective::Xor => state.push_unit(Box::new(GateUnit::new(
            GateKernel::<B, XorFold>::new(gate_records, state.shape, nd_range),
            first_slot,
            dependency_list,
        ))),
        Connective::Not => state.push_unit(Box::new(GateUnit::new(
            GateKernel::<B, NotFold>::new(gate_records, state.shape, nd_range),
            first_slot,
            dependency_list,
        ))),
        Connective::Nand => state.push_unit(Box::new(GateUnit::new(
            GateKernel::<B, NandFold>::new(gate_records, state.shape, nd_range),
            first_slot,
            dependency_list,
        ))),
        Connective::Nor => state.push_unit(Box::new(GateUnit::new(
            GateKernel::<B, NorFold>::new(gate_records, state.shape, nd_range),
            first_slot,
            dependency_list,
        ))),
        Connective::Null => state.push_unit(Box::new(GateUnit::new(
            GateKernel::<B, NullFold>::new(gate_records, state.shape, nd_range),
            first_slot,
            dependency_list,
        ))),
        Connective::Atleast => {
            let atleast_records: Vec<AtleastGateRecord> = gate_records
                .into_iter()
                .zip(gathered.iter())
                .map(|(gate, inputs)| AtleastGateRecord {
                    gate,
                    min_number: inputs.min_number,
                })
                .collect();
            state.push_unit(Box::new(AtleastUnit::new(
                AtleastKernel::new(atleast_records, state.shape, nd_range),
                first_slot,
                dependency_list,
            )))
        }
        // El planificador de olas rechaza estas conectivas antes.
        Connective::Iff | Connective::Imply | Connective::Cardinality => {
            unreachable!("connective without kernel must be rejected during wave planning")
        }
    };

    for &node_index in gate_indices {
        state.unit_by_node.insert(node_index, unit_index);
    }
    for (slot_offset, &node_index) in gate_indices.iter().enumerate() {
        state.buffer_by_node.insert(node_index, BufferId(first_slot.0 + slot_offset));
    }

    Ok(Some(unit_index))
}

/// Registra los tallies de una ola (por contrato, la ola final).
pub fn build_tallies_for_wave<B: Bitpack>(
    state: &mut QueueBuildState<B>,
    wave: &Wave,
) -> Result<Option<usize>, SimulationError> {
    // Orden de la ola: variables primero, compuertas por conectiva.
    let mut node_indices: Vec<i32> = wave.variables.clone();
    for (_connective, gates) in &wave.gates_by_connective {
        node_indices.extend(gates.iter().copied());
    }

    if node_indices.is_empty() {
        return Ok(None);
    }

    let mut dependencies: BTreeSet<usize> = BTreeSet::new();
    let mut records: Vec<TallyEvent> = Vec::with_capacity(node_indices.len());

    for &node_index in &node_indices {
        let Some(&owner_unit) = state.unit_by_node.get(&node_index) else {
            error!("Attempting to build tally for unknown event {node_index}");
            return Err(SimulationError::UnknownTallyTarget(node_index));
        };
        let Some(&buffer) = state.buffer_by_node.get(&node_index) else {
            error!("Attempting to build tally for unknown event {node_index}");
            return Err(SimulationError::UnknownTallyTarget(node_index));
        };
        dependencies.insert(owner_unit);
        records.push(TallyEvent::fresh(node_index, buffer));
    }

    // El eje de eventos queda confinado a un grupo por tally.
    let working_set = WorkingSet::<B>::new(&state.profile, records.len(), state.shape);
    let local_range = working_set.local_range_for_tally();
    let nd_range = working_set.nd_range(local_range);

    let kernel = TallyKernel::new(records, state.shape, nd_range);
    let unit_index = state.push_unit(Box::new(TallyUnit::new(
        kernel,
        dependencies.into_iter().collect(),
    )));

    for (record_slot, &node_index) in node_indices.iter().enumerate() {
        state.tally_locator.insert(node_index, (unit_index, record_slot));
    }

    Ok(Some(unit_index))
}
