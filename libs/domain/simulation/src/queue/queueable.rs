// [libs/domain/simulation/src/queue/queueable.rs]
/*!
 * =================================================================
 * APARATO: QUEUEABLE UNITS (V9.2 - SWISS WATCH SEAL)
 * CLASIFICACIÓN: DOMAIN SCHEDULING (ESTRATO L2)
 * RESPONSABILIDAD: UNIDADES ENCOLABLES CON DEPENDENCIAS RASTREADAS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. DEPENDENCY LEDGER: Cada unidad registra los índices de las
 *    unidades upstream propietarias de todo buffer que lee; la
 *    sumisión verifica que cada dependencia ya completó la iteración
 *    en curso (el análogo del event handle del dispositivo).
 * 2. SINGLE-SHOT vs ITERABLE: Las compuertas lanzan su kernel tal
 *    cual; muestreo y tally incrementan un contador interno capturado
 *    por valor, de modo que las semillas del PRNG y la finalización
 *    estadística observan una iteración monótona.
 * 3. TOPOLOGICAL VECTOR: Las unidades viven en un vector en orden de
 *    construcción; toda dependencia apunta hacia atrás, lo que
 *    garantiza aciclicidad por construcción.
 * =================================================================
 */

use arbol_core_sampling::bitpack::Bitpack;

use crate::buffers::{BufferArena, BufferId};
use crate::kernels::{AtleastKernel, BasicEventKernel, BitFold, GateKernel, TallyKernel};
use crate::records::TallySnapshot;

/// Unidad encolable del pipeline.
///
/// La sumisión recibe la arena completa; cada unidad conoce el primer
/// slot de su región de escritura y reparte el préstamo en
/// (olas anteriores, salidas propias).
pub trait Queueable<B: Bitpack>: Send {
    /// Índices de las unidades upstream de las que depende.
    fn dependencies(&self) -> &[usize];

    /// Iteraciones completadas: el marcador de evento de la unidad.
    fn completed_iterations(&self) -> u64;

    /// Lanza el kernel de la unidad sobre la arena.
    fn submit(&mut self, arena: &mut BufferArena<B>);

    /// Instantánea de tally si la unidad reduce tallies.
    fn tally_snapshot(&self, slot: usize) -> Option<TallySnapshot> {
        let _ = slot;
        None
    }
}

/// Unidad iterable de muestreo de eventos básicos.
pub struct SampleUnit<B: Bitpack> {
    kernel: BasicEventKernel<B>,
    first_output_slot: BufferId,
    dependencies: Vec<usize>,
    completed: u64,
    iteration: u32,
}

impl<B: Bitpack> SampleUnit<B> {
    pub fn new(kernel: BasicEventKernel<B>, first_output_slot: BufferId) -> Self {
        Self {
            kernel,
            first_output_slot,
            // El muestreo no lee buffer alguno: sin dependencias.
            dependencies: Vec::new(),
            completed: 0,
            iteration: 0,
        }
    }
}

impl<B: Bitpack> Queueable<B> for SampleUnit<B> {
    fn dependencies(&self) -> &[usize] {
        &self.dependencies
    }

    fn completed_iterations(&self) -> u64 {
        self.completed
    }

    fn submit(&mut self, arena: &mut BufferArena<B>) {
        self.iteration += 1;
        let iteration_local = self.iteration;
        let (_earlier, writable) = arena.split_for_write(self.first_output_slot);
        self.kernel.execute(writable, iteration_local);
        self.completed += 1;
    }
}

/// Unidad single-shot de compuertas homogéneas de una conectiva.
pub struct GateUnit<B: Bitpack, F: BitFold> {
    kernel: GateKernel<B, F>,
    first_output_slot: BufferId,
    dependencies: Vec<usize>,
    completed: u64,
}

impl<B: Bitpack, F: BitFold> GateUnit<B, F> {
    pub fn new(kernel: GateKernel<B, F>, first_output_slot: BufferId, dependencies: Vec<usize>) -> Self {
        Self {
            kernel,
            first_output_slot,
            dependencies,
            completed: 0,
        }
    }
}

impl<B: Bitpack, F: BitFold> Queueable<B> for GateUnit<B, F> {
    fn dependencies(&self) -> &[usize] {
        &self.dependencies
    }

    fn completed_iterations(&self) -> u64 {
        self.completed
    }

    fn submit(&mut self, arena: &mut BufferArena<B>) {
        let (earlier, writable) = arena.split_for_write(self.first_output_slot);
        self.kernel.execute(earlier, writable);
        self.completed += 1;
    }
}

/// Unidad single-shot de compuertas K-de-N.
pub struct AtleastUnit<B: Bitpack> {
    kernel: AtleastKernel<B>,
    first_output_slot: BufferId,
    dependencies: Vec<usize>,
    completed: u64,
}

impl<B: Bitpack> AtleastUnit<B> {
    pub fn new(kernel: AtleastKernel<B>, first_output_slot: BufferId, dependencies: Vec<usize>) -> Self {
        Self {
            kernel,
            first_output_slot,
            dependencies,
            completed: 0,
        }
    }
}

impl<B: Bitpack> Queueable<B> for AtleastUnit<B> {
    fn dependencies(&self) -> &[usize] {
        &self.dependencies
    }

    fn completed_iterations(&self) -> u64 {
        self.completed
    }

    fn submit(&mut self, arena: &mut BufferArena<B>) {
        let (earlier, writable) = arena.split_for_write(self.first_output_slot);
        self.kernel.execute(earlier, writable);
        self.completed += 1;
    }
}

/// Unidad iterable de reducción de tallies.
pub struct TallyUnit<B: Bitpack> {
    kernel: TallyKernel<B>,
    dependencies: Vec<usize>,
    completed: u64,
    iteration: u32,
}

impl<B: Bitpack> TallyUnit<B> {
    pub fn new(kernel: TallyKernel<B>, dependencies: Vec<usize>) -> Self {
        Self {
            kernel,
            dependencies,
            completed: 0,
            iteration: 0,
        }
    }

    /// Instantánea del tally en la posición `slot` del lote.
    pub fn snapshot(&self, slot: usize) -> TallySnapshot {
        self.kernel.snapshot(slot)
    }
}

impl<B: Bitpack> Queueable<B> for TallyUnit<B> {
    fn dependencies(&self) -> &[usize] {
        &self.dependencies
    }

    fn completed_iterations(&self) -> u64 {
        self.completed
    }

    fn submit(&mut self, arena: &mut BufferArena<B>) {
        self.iteration += 1;
        let iteration_local = self.iteration;
        self.kernel.execute(arena.all(), iteration_local);
        self.completed += 1;
    }

    fn tally_snapshot(&self, slot: usize) -> Option<TallySnapshot> {
        Some(self.kernel.snapshot(slot))
    }
}
