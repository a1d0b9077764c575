use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use ginsu::api::*;
use serde::Serialize;
use serde_json::json;
use std::path::Path;
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Demo driver for the ginsu solid kernel")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Op {
    Union,
    Intersection,
    Difference,
}

impl From<Op> for BooleanOp {
    fn from(op: Op) -> Self {
        match op {
            Op::Union => BooleanOp::Union,
            Op::Intersection => BooleanOp::Intersection,
            Op::Difference => BooleanOp::Difference,
        }
    }
}

#[derive(Subcommand)]
enum Action {
    /// Combine a cube with a rotated, shifted copy of itself and report the result
    Demo {
        #[arg(long, value_enum, default_value_t = Op::Intersection)]
        op: Op,
        /// Orientation of the second cube as a quaternion `x,y,z,w` (need not be unit)
        #[arg(long, value_delimiter = ',', default_values_t = [0.0, 0.0, 0.5, 1.0])]
        quat: Vec<f32>,
        /// Offset of the second cube along every axis
        #[arg(long, default_value_t = 0.5)]
        shift: f32,
        /// Write the report here (plus a provenance sidecar) instead of stdout
        #[arg(long)]
        out: Option<String>,
    },
    /// Combine a cylinder with a unit cube
    Cylinder {
        #[arg(long, value_enum, default_value_t = Op::Difference)]
        op: Op,
        #[arg(long, default_value_t = DEFAULT_CONE_SEGMENTS)]
        segments: usize,
        #[arg(long)]
        out: Option<String>,
    },
    /// Print a small provenance JSON block
    Report,
}

/// Summary of a boolean result.
#[derive(Debug, Serialize)]
struct SolidReport {
    op: String,
    faces: usize,
    vertices: usize,
    edges: usize,
    shells: usize,
    closed: bool,
    volume: String,
    volume_approx: f64,
    triangles: usize,
}

impl SolidReport {
    fn new(op: BooleanOp, solid: &Solid) -> Self {
        let volume = solid.volume();
        Self {
            op: op.to_string(),
            faces: solid.face_count(),
            vertices: solid.vertex_count(),
            edges: solid.edge_count(),
            shells: solid.shell_count(),
            closed: solid.is_closed(),
            volume: volume.to_string(),
            volume_approx: to_f64(&volume),
            triangles: RenderBuffer::from_solid(solid).triangle_count(),
        }
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Demo {
            op,
            quat,
            shift,
            out,
        } => demo(op.into(), &quat, shift, out),
        Action::Cylinder { op, segments, out } => cylinder(op.into(), segments, out),
        Action::Report => report(),
    }
}

fn centered_cube() -> Result<Solid> {
    Ok(Solid::cuboid(&point(-1, -1, -1), &point(1, 1, 1))?)
}

fn demo_operands(quat: &[f32], shift: f32) -> Result<(Solid, Solid)> {
    let [x, y, z, w] = quat else {
        bail!("quaternion needs 4 components, got {}", quat.len());
    };
    let rot = AffineTransform::rotation_from_quaternion_f32([*x, *y, *z, *w])
        .context("quaternion must be finite and non-zero")?;
    let s = from_f32(shift).context("shift must be finite")?;
    let t = AffineTransform::translation(Vec3::new(s.clone(), s.clone(), s));
    let left = centered_cube()?;
    let right = left.transformed(&t.compose(&rot))?;
    Ok((left, right))
}

fn demo(op: BooleanOp, quat: &[f32], shift: f32, out: Option<String>) -> Result<()> {
    tracing::info!(%op, ?quat, shift, "demo");
    let (left, right) = demo_operands(quat, shift)?;
    let result = left.boolean(&right, op)?;
    let report = SolidReport::new(op, &result);
    emit(&report, out, json!({ "op": op.to_string(), "quat": quat, "shift": shift }))
}

fn cylinder(op: BooleanOp, segments: usize, out: Option<String>) -> Result<()> {
    tracing::info!(%op, segments, "cylinder");
    let cyl = Solid::truncated_cone(&rat(3, 4), &rat(3, 4), segments)?;
    let result = cyl.boolean(&centered_cube()?, op)?;
    let report = SolidReport::new(op, &result);
    emit(&report, out, json!({ "op": op.to_string(), "segments": segments }))
}

fn emit(report: &SolidReport, out: Option<String>, params: serde_json::Value) -> Result<()> {
    let body = serde_json::to_vec_pretty(report)?;
    let Some(out) = out else {
        println!("{}", String::from_utf8_lossy(&body));
        return Ok(());
    };
    let out_path = Path::new(&out);
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(out_path, body).with_context(|| format!("writing {out}"))?;
    let prov = provenance::write_sidecar(out_path, provenance::Payload::new(params))?;
    tracing::info!(out, provenance = %prov.display(), "report written");
    Ok(())
}

fn report() -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "ginsu": VERSION,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
