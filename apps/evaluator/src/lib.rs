// [apps/evaluator/src/lib.rs]
/*!
 * =================================================================
 * APARATO: EVALUATOR MISSION LIBRARY (V6.2 - ZENITH SHELL)
 * CLASIFICACIÓN: APPLICATION LAYER (ESTRATO L3)
 * RESPONSABILIDAD: INGESTA DE MODELOS JSON Y EJECUCIÓN DE MISIONES
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. CONTRACT INGESTION: El modelo JSON describe eventos básicos,
 *    compuertas con argumentos con signo y la raíz; la traducción al
 *    PDAG reutiliza el constructor validante del dominio.
 * 2. SEALED REPORT: Cada misión emite un reporte inmutable con
 *    identificador de ejecución, marcas temporales y la instantánea
 *    del tally raíz.
 * =================================================================
 */

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use arbol_domain_pdag::{Connective, Pdag, PdagError};
use arbol_domain_simulation::prelude::{MonteCarloPipeline, PipelineSettings, TallySnapshot};

/// Descriptor JSON de un evento básico.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasicEventModel {
    pub index: i32,
    pub probability: f64,
}

/// Descriptor JSON de una compuerta.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateModel {
    pub index: i32,
    pub connective: Connective,
    /// Argumentos con signo: el negativo denota negación.
    pub args: Vec<i32>,
    /// Umbral k, obligatorio solo para compuertas at-least.
    #[serde(default)]
    pub min_number: u16,
}

/// Modelo de misión completo: el contrato de entrada del Tasador.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionModel {
    pub root: i32,
    pub basic_events: Vec<BasicEventModel>,
    pub gates: Vec<GateModel>,
}

impl MissionModel {
    /// Carga y decodifica el modelo desde un archivo JSON.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let raw_contents = fs::read_to_string(path)
            .with_context(|| format!("No se pudo leer el modelo de misión: {}", path.display()))?;
        let model: MissionModel = serde_json::from_str(&raw_contents)
            .with_context(|| format!("Modelo de misión JSON inválido: {}", path.display()))?;
        Ok(model)
    }

    /// Traduce el modelo al PDAG validado del dominio.
    pub fn into_pdag(self) -> Result<Pdag, PdagError> {
        let mut builder = Pdag::builder();
        for basic_event in self.basic_events {
            builder = builder.basic_event(basic_event.index, basic_event.probability);
        }
        for gate in self.gates {
            builder = match gate.connective {
                Connective::Atleast => builder.atleast_gate(gate.index, gate.args, gate.min_number),
                connective => builder.gate(gate.index, connective, gate.args),
            };
        }
        builder.root(self.root).build()
    }
}

/// Parámetros efectivos de una misión de evaluación.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MissionParameters {
    pub batch_size: usize,
    pub bitpacks_per_batch: usize,
    pub iterations: usize,
    pub bitpack_width_bits: u32,
}

/// Reporte inmutable de certificación de la misión.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub run_identifier: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub root_index: i32,
    pub parameters: MissionParameters,
    pub num_waves: usize,
    pub num_queueable_units: usize,
    pub total_sampled_bits: u64,
    pub tally: TallySnapshot,
}

/// Ejecuta la misión completa con words de 64 bits.
///
/// # Errors:
/// - Propaga fallos de consistencia del modelo y de construcción del
///   pipeline; ambos son fatales para la instancia.
pub fn run_mission(model: MissionModel, parameters: MissionParameters) -> Result<EvaluationReport> {
    let started_at = Utc::now();
    let run_identifier = Uuid::new_v4();
    let root_index = model.root;

    let mut pdag = model
        .into_pdag()
        .context("El modelo de misión violó la consistencia del PDAG")?;

    let settings = PipelineSettings {
        batch_size: parameters.batch_size,
        bitpacks_per_batch: parameters.bitpacks_per_batch,
        desired_occupancy: None,
    };

    let mut pipeline = MonteCarloPipeline::<u64>::new(&mut pdag, settings)
        .context("La construcción del pipeline Monte Carlo falló")?;

    info!(
        "🎯 [MISSION]: run={} root={} iterations={}",
        run_identifier, root_index, parameters.iterations
    );

    let tally = pipeline.tally(root_index, parameters.iterations);
    let effective_shape = pipeline.shape();
    let total_sampled_bits = parameters.iterations as u64
        * effective_shape.sampled_bits_per_iteration::<u64>();

    Ok(EvaluationReport {
        run_identifier,
        started_at,
        finished_at: Utc::now(),
        root_index,
        parameters: MissionParameters {
            batch_size: effective_shape.batch_size,
            bitpacks_per_batch: effective_shape.bitpacks_per_batch,
            iterations: parameters.iterations,
            bitpack_width_bits: 64,
        },
        num_waves: pipeline.num_waves(),
        num_queueable_units: pipeline.num_units(),
        total_sampled_bits,
        tally,
    })
}

/// Persiste el reporte como JSON legible.
pub fn write_report(report: &EvaluationReport, path: &Path) -> Result<()> {
    let serialized = serde_json::to_string_pretty(report).context("Serialización del reporte")?;
    fs::write(path, serialized)
        .with_context(|| format!("No se pudo escribir el reporte: {}", path.display()))?;
    Ok(())
}
