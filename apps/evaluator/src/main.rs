// [apps/evaluator/src/main.rs]
/*!
 * =================================================================
 * APARATO: EVALUATOR SHELL (V6.0 - ZENITH SHELL)
 * CLASIFICACIÓN: APPLICATION LAYER (ENTRY POINT)
 * RESPONSABILIDAD: BOOTSTRAP DE ENTORNO E IGNICIÓN DE LA MISIÓN
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. SWITCHBOARD PURO: El shell solo parsea directivas, ancla el hilo
 *    anfitrión y delega la misión completa a la librería.
 * 2. ERROR TRIAGE: Manejo rico de fallos de ignición vía contexto
 *    anyhow; todo colapso deja rastro estructurado en Vigía.
 * =================================================================
 */

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use arbol_evaluator_lib::{run_mission, write_report, MissionModel, MissionParameters};

/// Directivas de mando del Tasador soberano.
#[derive(Parser, Debug)]
#[command(
    author = "metaShark Tech",
    version = "0.3.1",
    about = "Arbol Evaluator // Evaluación Monte Carlo bit-paralela de árboles de fallos"
)]
struct EvaluatorDirectives {
    /// Ruta del modelo de misión JSON (raíz, eventos, compuertas).
    #[arg(long = "input-json", short = 'i', env = "ARBOL_INPUT_JSON")]
    input_json: PathBuf,

    /// Ruta del reporte JSON de salida; omitirla emite por stdout.
    #[arg(long = "output-json", short = 'o', env = "ARBOL_OUTPUT_JSON")]
    output_json: Option<PathBuf>,

    /// Número de batches paralelos por iteración.
    #[arg(long, env = "ARBOL_BATCH_SIZE", default_value_t = 16)]
    batch_size: usize,

    /// Número de bit-packs por batch.
    #[arg(long, env = "ARBOL_BITPACKS_PER_BATCH", default_value_t = 1024)]
    bitpacks_per_batch: usize,

    /// Iteraciones del pipeline a someter.
    #[arg(long, short = 'k', env = "ARBOL_ITERATIONS", default_value_t = 16)]
    iterations: usize,
}

fn main() -> Result<()> {
    // 1. INICIALIZACIÓN DEL SISTEMA DE OBSERVABILIDAD
    arbol_shared_vigia::init_tracing("arbol_evaluator");

    // 2. PARSEO DE DIRECTIVAS ESTRATÉGICAS
    let directives = EvaluatorDirectives::parse();
    info!("💠 [SHELL]: Arbol Evaluator ignition sequence starting...");
    info!("    input_json          i: {}", directives.input_json.display());
    info!(
        "    output_json         o: {}",
        directives
            .output_json
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "stdout".to_string())
    );
    info!("    batch_size           : {}", directives.batch_size);
    info!("    bitpacks_per_batch   : {}", directives.bitpacks_per_batch);
    info!("    iterations          k: {}", directives.iterations);

    // 3. ANCLAJE DEL HILO ANFITRIÓN (afinidad de silicio)
    if let Some(core_identifiers) = core_affinity::get_core_ids() {
        if let Some(primary_core) = core_identifiers.first() {
            if core_affinity::set_for_current(*primary_core) {
                info!("📌 [SHELL]: host thread pinned to core {:?}", primary_core.id);
            } else {
                warn!("🐢 [SHELL]: host thread pinning rejected by the scheduler");
            }
        }
    }

    // 4. CARGA DEL MODELO Y EJECUCIÓN DE LA MISIÓN
    let model = MissionModel::load_from_file(&directives.input_json)?;
    let parameters = MissionParameters {
        batch_size: directives.batch_size,
        bitpacks_per_batch: directives.bitpacks_per_batch,
        iterations: directives.iterations,
        bitpack_width_bits: 64,
    };

    let report = run_mission(model, parameters)?;

    info!(
        "🏁 [SHELL]: mission sealed. mean={:.6e} std_err={:.3e} ci95=[{:.6e}, {:.6e}]",
        report.tally.mean, report.tally.std_err, report.tally.ci_95_low, report.tally.ci_95_high
    );

    // 5. EMISIÓN DEL REPORTE CERTIFICADO
    match directives.output_json {
        Some(output_path) => write_report(&report, &output_path)?,
        None => {
            let serialized =
                serde_json::to_string_pretty(&report).context("Serialización del reporte")?;
            println!("{serialized}");
        }
    }

    Ok(())
}
