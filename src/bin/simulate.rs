use anyhow::{Context, Result};
use prometheus_supervisor::control::controller_by_name;
use prometheus_supervisor::params::{ParamRecord, ParamValue};
use prometheus_supervisor::simulation::SimulatedRobot;
use prometheus_supervisor::{RobotConfig, Supervisor};
use std::env;

/// Simulated seconds to run for
const DURATION_S: f64 = 60.0;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Usage: simulate [config.toml] [goal_x goal_y]
    let args: Vec<String> = env::args().skip(1).collect();
    let config = match args.first() {
        Some(path) => RobotConfig::from_file(path)
            .with_context(|| format!("loading robot configuration from {}", path))?,
        None => RobotConfig::khepera3_defaults(),
    };

    let geometry = config.geometry()?;
    let mut robot = SimulatedRobot::new(geometry, config.initial_pose);
    let controller = controller_by_name(&config.supervisor.controller)?;
    let mut supervisor = Supervisor::new(geometry, config.initial_pose, &robot.robot_state(), controller)?;

    if let [_, x, y] = args.as_slice() {
        let goal = ParamRecord::new()
            .with("x", x.parse::<f64>().context("goal x")?)
            .with("y", y.parse::<f64>().context("goal y")?);
        supervisor.set_parameters(&ParamRecord::new().with("goal", ParamValue::Group(goal)))?;
    }

    println!(
        "Running {} for {}s with parameters {}",
        supervisor.controller_name(),
        DURATION_S,
        serde_json::to_string(&supervisor.get_parameters())?
    );
    println!("t,x_true,y_true,theta_true,x_est,y_est,theta_est");

    let dt = config.tick_seconds();
    let steps = (DURATION_S / dt).ceil() as usize;
    for step in 0..steps {
        let (vl, vr) = supervisor.execute(&robot.robot_state(), dt)?;
        robot.set_wheel_speeds(vl, vr);
        robot.step(dt);

        if step % 20 == 0 {
            let truth = robot.pose();
            let estimate = supervisor.pose_estimate();
            println!(
                "{:.2},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4}",
                step as f64 * dt,
                truth.x,
                truth.y,
                truth.theta,
                estimate.x,
                estimate.y,
                estimate.theta
            );
        }
    }

    let truth = robot.pose();
    let estimate = supervisor.pose_estimate();
    println!(
        "Final pose: true=({:.3}, {:.3}) estimated=({:.3}, {:.3}) drift={:.4}m",
        truth.x,
        truth.y,
        estimate.x,
        estimate.y,
        truth.distance_to(&estimate)
    );
    Ok(())
}
