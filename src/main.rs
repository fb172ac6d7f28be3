//! ROI-Replay.
//!
//! Spielt ein Zeiger-Skript gegen ein Graustufenbild ab und gibt die
//! Statistik der verbleibenden Messungen aus.
//!
//! Aufruf: `roi-replay <bild> <skript.json> [optionen.toml]`

use anyhow::Context;
use ellipse_roi::{
    DicomTime, ImageContext, ImageMeta, LumaImageSource, PixelSpacing, PointerEvent,
    PointerPoints, RoiController, RoiIntent, RoiOptions, RoiState, SuvParameters, ToolMode,
    ViewTransform,
};
use glam::DVec2;
use serde::Deserialize;
use std::path::{Path, PathBuf};

fn main() -> anyhow::Result<()> {
    ReplayRunner::run()
}

/// SUV-Angaben im Skript; Zeiten als DICOM-`TM`-Text.
#[derive(Debug, Deserialize)]
struct ScriptSuv {
    patient_weight_kg: f64,
    total_dose_bq: f64,
    half_life_s: f64,
    injection_start: String,
    series_acquisition: String,
}

impl ScriptSuv {
    fn parse(&self) -> anyhow::Result<SuvParameters> {
        Ok(SuvParameters {
            patient_weight_kg: self.patient_weight_kg,
            total_dose_bq: self.total_dose_bq,
            half_life_s: self.half_life_s,
            injection_start: DicomTime::parse(&self.injection_start)
                .context("Ungültige Injektionszeit")?,
            series_acquisition: DicomTime::parse(&self.series_acquisition)
                .context("Ungültige Aufnahmezeit")?,
        })
    }
}

/// Ein Schritt des Skripts; Koordinaten in Bild-Pixeln.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum ScriptStep {
    Move {
        x: f64,
        y: f64,
        #[serde(default)]
        touch: bool,
    },
    Press {
        x: f64,
        y: f64,
        #[serde(default)]
        touch: bool,
        #[serde(default = "default_button")]
        button: u8,
    },
    Drag {
        x: f64,
        y: f64,
    },
    Release,
    Click,
    Render,
    ToolMode {
        mode: ToolMode,
    },
}

fn default_button() -> u8 {
    1
}

/// Skript-Datei.
#[derive(Debug, Deserialize)]
struct ReplayScript {
    #[serde(default)]
    image_id: Option<String>,
    #[serde(default)]
    meta: ImageMeta,
    #[serde(default)]
    spacing: PixelSpacing,
    #[serde(default)]
    suv: Option<ScriptSuv>,
    #[serde(default)]
    view: ViewTransform,
    steps: Vec<ScriptStep>,
}

struct ReplayRunner {
    state: RoiState,
    controller: RoiController,
    /// Event des letzten Press (Start- und Geräte-Info für Folge-Events)
    pressed: Option<PointerEvent>,
    /// Letzte Zeigerposition
    last: PointerPoints,
}

impl ReplayRunner {
    fn run() -> anyhow::Result<()> {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!("ROI-Replay v{} startet...", env!("CARGO_PKG_VERSION"));

        let mut args = std::env::args_os().skip(1);
        let (Some(image_path), Some(script_path)) = (args.next(), args.next()) else {
            anyhow::bail!("Aufruf: roi-replay <bild> <skript.json> [optionen.toml]");
        };
        let options_path = args
            .next()
            .map(PathBuf::from)
            .unwrap_or_else(RoiOptions::config_path);

        let script = load_script(Path::new(&script_path))?;
        let mut runner = Self::new(
            Path::new(&image_path),
            &script,
            RoiOptions::load_from_file(&options_path),
        )?;

        for (index, step) in script.steps.iter().enumerate() {
            runner
                .apply(step)
                .with_context(|| format!("Schritt {} fehlgeschlagen", index + 1))?;
        }
        runner.report();
        Ok(())
    }

    fn new(image_path: &Path, script: &ReplayScript, options: RoiOptions) -> anyhow::Result<Self> {
        let pixels = image::open(image_path)
            .with_context(|| format!("Bild konnte nicht geladen werden: {}", image_path.display()))?
            .to_luma16();
        let image_id = script
            .image_id
            .clone()
            .unwrap_or_else(|| image_path.display().to_string());
        let suv = script.suv.as_ref().map(ScriptSuv::parse).transpose()?;

        let source = LumaImageSource::new(pixels, &script.meta);
        let image = ImageContext::from_luma(image_id, source, script.meta.clone())
            .with_spacing(script.spacing)
            .with_suv(suv);

        let mut state = RoiState::new("replay");
        state.options = options;
        state.view = script.view;
        state.set_image(image);

        Ok(Self {
            state,
            controller: RoiController::new(),
            pressed: None,
            last: PointerPoints::from_image(DVec2::ZERO, &script.view),
        })
    }

    fn points(&self, x: f64, y: f64) -> PointerPoints {
        PointerPoints::from_image(DVec2::new(x, y), &self.state.view)
    }

    fn event(&self, current: PointerPoints, touch: bool) -> anyhow::Result<PointerEvent> {
        let extent = self
            .state
            .image
            .as_ref()
            .map(|image| image.extent)
            .context("Kein Bild gesetzt")?;
        Ok(if touch {
            PointerEvent::touch(current, extent)
        } else {
            PointerEvent::mouse(current, extent)
        })
    }

    /// Folge-Event eines Press: gleiche Startposition und gleiches Gerät.
    fn follow_up(&self, current: PointerPoints) -> anyhow::Result<PointerEvent> {
        match self.pressed {
            Some(pressed) => Ok(PointerEvent { current, ..pressed }),
            None => self.event(current, false),
        }
    }

    fn apply(&mut self, step: &ScriptStep) -> anyhow::Result<()> {
        let intent = match *step {
            ScriptStep::Move { x, y, touch } => {
                self.last = self.points(x, y);
                RoiIntent::PointerMoved {
                    event: self.event(self.last, touch)?,
                }
            }
            ScriptStep::Press {
                x,
                y,
                touch,
                button,
            } => {
                self.last = self.points(x, y);
                let event = self.event(self.last, touch)?.with_button(button);
                self.pressed = Some(event);
                RoiIntent::PointerPressed { event }
            }
            ScriptStep::Drag { x, y } => {
                self.last = self.points(x, y);
                RoiIntent::PointerDragged {
                    event: self.follow_up(self.last)?,
                }
            }
            ScriptStep::Release => RoiIntent::PointerReleased {
                event: self.end_press()?,
            },
            ScriptStep::Click => RoiIntent::PointerClicked {
                event: self.end_press()?,
            },
            ScriptStep::Render => RoiIntent::ImageRendered,
            ScriptStep::ToolMode { mode } => RoiIntent::ToolModeChanged { mode },
        };

        self.controller.handle_intent(&mut self.state, intent)?;
        for notification in self.state.take_notifications() {
            log::debug!(
                "{} für Messung {}",
                if notification.is_completed() {
                    "Abgeschlossen"
                } else {
                    "Geändert"
                },
                notification.measurement_id()
            );
        }
        Ok(())
    }

    fn end_press(&mut self) -> anyhow::Result<PointerEvent> {
        let event = self.follow_up(self.last)?;
        self.pressed = None;
        Ok(event)
    }

    fn report(&self) {
        if self.state.store.is_empty() {
            println!("Keine Messungen.");
            return;
        }
        for measurement in self.state.store.iter() {
            let stats = &measurement.stats;
            let unit = stats.unit.map_or("-", |unit| unit.label());
            print!("Messung {}:", measurement.id);
            match stats.area {
                Some(area) => print!(" Fläche {:.2} {}", area, unit),
                None => print!(" Fläche -"),
            }
            if let Some(ms) = stats.mean_std_dev {
                print!(
                    ", Mittelwert {:.2}, StdAbw {:.2} (n={})",
                    ms.mean, ms.std_dev, ms.count
                );
            }
            if let Some(suv) = stats.mean_std_dev_suv {
                print!(", SUV {:.3} ± {:.3}", suv.mean, suv.std_dev);
            }
            if measurement.invalidated {
                print!(" [veraltet]");
            }
            println!();
        }
    }
}

fn load_script(path: &Path) -> anyhow::Result<ReplayScript> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Skript konnte nicht gelesen werden: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Skript ungültig: {}", path.display()))
}
