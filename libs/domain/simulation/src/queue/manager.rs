// [libs/domain/simulation/src/queue/manager.rs]
/*!
 * =================================================================
 * APARATO: MONTE CARLO PIPELINE MANAGER (V15.2 - SWISS WATCH SEAL)
 * CLASIFICACIÓN: DOMAIN ORCHESTRATION (ESTRATO L2)
 * RESPONSABILIDAD: CICLO DE VIDA COMPLETO DEL PIPELINE DE EVALUACIÓN
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. SINGLE OWNER: El pipeline posee en exclusiva la arena de buffers
 *    y el vector de unidades encolables; el exterior solo recibe
 *    instantáneas y referencias por índice de nodo.
 * 2. ITERATION ATOMICITY: Una iteración es la sumisión ordenada de
 *    todas las unidades; el anfitrión no interviene entre kernels.
 * 3. GRACEFUL UNKNOWNS: Un índice de tally desconocido registra el
 *    error y retorna la instantánea por defecto, sin pánico.
 * =================================================================
 */

use std::collections::HashMap;

use tracing::{debug, error, info, instrument};

use arbol_core_device::profile::{host_profile, DeviceProfile};
use arbol_core_device::working_set::WorkingSet;
use arbol_core_sampling::bitpack::Bitpack;
use arbol_core_sampling::shape::SampleShape;
use arbol_domain_pdag::Pdag;

use crate::buffers::{BufferArena, BufferId};
use crate::errors::SimulationError;
use crate::layer_planner::plan_waves;
use crate::queue::builder::{
    build_kernel_for_gates_of_connective, build_kernel_for_variables, build_tallies_for_wave,
    QueueBuildState,
};
use crate::queue::queueable::Queueable;
use crate::queue::DeviceQueue;
use crate::records::TallySnapshot;

/// Opciones reconocidas en la construcción del pipeline.
#[derive(Debug, Clone, Copy)]
pub struct PipelineSettings {
    /// Número de batches paralelos por iteración.
    pub batch_size: usize,
    /// Número de bit-packs por batch.
    pub bitpacks_per_batch: usize,
    /// Work-groups objetivo por unidad de cómputo; `None` delega en
    /// la heurística por backend.
    pub desired_occupancy: Option<usize>,
}

/// Pipeline Monte Carlo completo sobre un PDAG planificado.
pub struct MonteCarloPipeline<B: Bitpack> {
    arena: BufferArena<B>,
    units: Vec<Box<dyn Queueable<B>>>,
    buffer_by_node: HashMap<i32, BufferId>,
    tally_locator: HashMap<i32, (usize, usize)>,
    shape: SampleShape,
    device: DeviceQueue,
    num_waves: usize,
}

impl<B: Bitpack> MonteCarloPipeline<B> {
    /// Construye el pipeline completo: olas, buffers, kernels y
    /// tallies de la ola final.
    ///
    /// # Errors:
    /// - Fallos de consistencia del modelo (fatales, con log).
    /// - Geometría de muestreo degenerada.
    /// - Fallo de arranque del pool del dispositivo.
    #[instrument(skip_all, fields(batch_size = settings.batch_size, bitpacks_per_batch = settings.bitpacks_per_batch))]
    pub fn new(pdag: &mut Pdag, settings: PipelineSettings) -> Result<Self, SimulationError> {
        // 1. GEOMETRÍA: validación y redondeo por alineación.
        let requested = SampleShape::new(settings.batch_size, settings.bitpacks_per_batch)?;
        let shape = WorkingSet::<B>::rounded(requested);

        // 2. PLANIFICACIÓN DE OLAS (orden topológico por capas).
        let waves = plan_waves(pdag)?;

        // 3. PERFIL DEL DISPOSITIVO Y COLA DE MANDO.
        let profile: DeviceProfile = host_profile().clone();
        let reporting_set = WorkingSet::<B>::new(&profile, pdag.num_nodes(), shape);
        debug!("📊 [PIPELINE]: working set\n{reporting_set}");
        if let Some(occupancy) = settings.desired_occupancy {
            debug!("📊 [PIPELINE]: desired_occupancy override = {occupancy}");
        }
        let device = DeviceQueue::for_profile(&profile)?;

        // 4. CONSTRUCCIÓN DE UNIDADES, OLA POR OLA.
        let mut state = QueueBuildState::<B>::new(shape, profile);
        for wave in &waves {
            build_kernel_for_variables(&mut state, pdag, &wave.variables)?;
            for (connective, gate_indices) in &wave.gates_by_connective {
                build_kernel_for_gates_of_connective(&mut state, pdag, *connective, gate_indices)?;
            }
        }

        // 5. TALLIES: la ola final queda registrada para conteo.
        if let Some(final_wave) = waves.last() {
            build_tallies_for_wave(&mut state, final_wave)?;
        }

        info!(
            "🚀 [PIPELINE]: online. waves={}, units={}, buffers={}",
            waves.len(),
            state.units.len(),
            state.arena.num_buffers()
        );

        Ok(Self {
            arena: state.arena,
            units: state.units,
            buffer_by_node: state.buffer_by_node,
            tally_locator: state.tally_locator,
            shape,
            device,
            num_waves: waves.len(),
        })
    }

    /// Somete todas las unidades en orden topológico de construcción.
    ///
    /// La cola de dispositivo garantiza que cada kernel observa las
    /// escrituras completas de sus dependencias: aquí se verifica que
    /// toda dependencia ya completó la iteración en curso.
    pub fn submit_all(&mut self) {
        let units = &mut self.units;
        let arena = &mut self.arena;

        self.device.install(|| {
            for unit_position in 0..units.len() {
                let (upstream, current_tail) = units.split_at_mut(unit_position);
                let unit = &mut current_tail[0];
                let expected_iteration = unit.completed_iterations() + 1;

                for &dependency in unit.dependencies() {
                    assert!(
                        dependency < unit_position,
                        "queueable dependencies must point backwards"
                    );
                    assert_eq!(
                        upstream[dependency].completed_iterations(),
                        expected_iteration,
                        "dependency must complete before dependent submission"
                    );
                }

                unit.submit(arena);
            }
        });
    }

    /// Somete el pipeline `count` veces y retorna la instantánea del
    /// tally solicitado.
    ///
    /// Un índice desconocido registra el error y retorna la
    /// instantánea por defecto (media 0, intervalos {0,0,0,0}).
    #[instrument(skip(self))]
    pub fn tally(&mut self, event_index: i32, count: usize) -> TallySnapshot {
        let Some(&(unit_index, record_slot)) = self.tally_locator.get(&event_index) else {
            error!("Unable to tally probability for unknown event with index {event_index}");
            return TallySnapshot::default();
        };

        info!("Counting {count} tallies for event with index {event_index}");
        for _ in 0..count {
            self.submit_all();
        }
        self.log_all_tallies();

        self.units[unit_index]
            .tally_snapshot(record_slot)
            .unwrap_or_default()
    }

    /// Instantánea sin sumisión adicional, si el nodo está registrado.
    pub fn tally_snapshot(&self, event_index: i32) -> Option<TallySnapshot> {
        let &(unit_index, record_slot) = self.tally_locator.get(&event_index)?;
        self.units[unit_index].tally_snapshot(record_slot)
    }

    /// Vista de solo lectura del buffer de muestras de un nodo.
    pub fn sample_buffer(&self, node_index: i32) -> Option<&[B]> {
        let &buffer = self.buffer_by_node.get(&node_index)?;
        Some(self.arena.buffer(buffer))
    }

    /// Geometría efectiva tras el redondeo del planificador.
    #[inline]
    pub fn shape(&self) -> SampleShape {
        self.shape
    }

    #[inline]
    pub fn num_units(&self) -> usize {
        self.units.len()
    }

    #[inline]
    pub fn num_waves(&self) -> usize {
        self.num_waves
    }

    /// Bitácora de todos los tallies registrados, a nivel DEBUG.
    fn log_all_tallies(&self) {
        for (&node_index, &(unit_index, record_slot)) in &self.tally_locator {
            if let Some(snapshot) = self.units[unit_index].tally_snapshot(record_slot) {
                debug!(
                    "tally[{}] :: [std_err] :: [p05, mean, p95] :: [{}] :: [{}, {}, {}]",
                    node_index, snapshot.std_err, snapshot.ci_95_low, snapshot.mean, snapshot.ci_95_high
                );
            }
        }
    }
}
