use anyhow::{Context, Result};
use prometheus_supervisor::control::controller_by_name;
use prometheus_supervisor::params::ParamRecord;
use prometheus_supervisor::simulation::SimulatedRobot;
use prometheus_supervisor::{RobotConfig, Supervisor};
use std::env;
use std::io::{self, BufRead};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};

/// A supervisor and the simulated robot it drives
///
/// Both live behind one mutex so parameter updates from stdin never
/// interleave with a running tick.
struct SupervisorNode {
    supervisor: Supervisor,
    robot: SimulatedRobot,
    ticks: u64,
}

impl SupervisorNode {
    fn new(config: &RobotConfig) -> Result<Self> {
        let geometry = config.geometry()?;
        let robot = SimulatedRobot::new(geometry, config.initial_pose);
        let controller = controller_by_name(&config.supervisor.controller)?;
        let supervisor =
            Supervisor::new(geometry, config.initial_pose, &robot.robot_state(), controller)?;

        Ok(SupervisorNode {
            supervisor,
            robot,
            ticks: 0,
        })
    }

    fn timer_callback(&mut self, dt: f64) {
        match self.supervisor.execute(&self.robot.robot_state(), dt) {
            Ok((vl, vr)) => self.robot.set_wheel_speeds(vl, vr),
            Err(e) => {
                // Skip this tick; the robot coasts on its last command
                log::error!("Supervisor tick failed: {}", e);
            }
        }
        self.robot.step(dt);
        self.ticks += 1;

        if self.ticks % 20 == 0 {
            let pose = self.supervisor.pose_estimate();
            log::info!(
                "Estimated pose: x={:.3}, y={:.3}, theta={:.3}",
                pose.x,
                pose.y,
                pose.theta
            );
        }
    }

    /// Handle one line from stdin
    ///
    /// `get` prints the parameters, `controller <name>` switches controller,
    /// anything else is parsed as a JSON parameter record.
    fn command_callback(&mut self, line: &str) -> Result<()> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(());
        }

        if line == "get" {
            println!("{}", serde_json::to_string(&self.supervisor.get_parameters())?);
            return Ok(());
        }

        if let Some(name) = line.strip_prefix("controller ") {
            let controller = controller_by_name(name.trim())?;
            self.supervisor.select_controller(controller, None)?;
            return Ok(());
        }

        let record: ParamRecord =
            serde_json::from_str(line).context("parameters must be a JSON object")?;
        self.supervisor.set_parameters(&record)?;
        log::info!("Applied parameters {}", line);
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match env::args().nth(1) {
        Some(path) => RobotConfig::from_file(&path)
            .with_context(|| format!("loading robot configuration from {}", path))?,
        None => RobotConfig::khepera3_defaults(),
    };

    let node = Arc::new(Mutex::new(SupervisorNode::new(&config)?));
    log::info!(
        "Supervisor node running {} every {}ms. Type 'get', 'controller <name>' or a JSON record.",
        config.supervisor.controller,
        config.supervisor.tick_ms
    );

    let tick_node = Arc::clone(&node);
    let dt = config.tick_seconds();
    let period = Duration::from_millis(config.supervisor.tick_ms);
    let ticker = tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            tick_node.lock().await.timer_callback(dt);
        }
    });

    // Blocking stdin reads stay off the runtime so shutdown never waits on them
    let (line_tx, mut line_rx) = mpsc::unbounded_channel::<String>();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if line_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    log::error!("Failed to read stdin: {}", e);
                    break;
                }
            }
        }
    });

    let command_node = Arc::clone(&node);
    let commands = tokio::spawn(async move {
        while let Some(line) = line_rx.recv().await {
            if let Err(e) = command_node.lock().await.command_callback(&line) {
                log::warn!("Command rejected: {:#}", e);
            }
        }
    });

    tokio::signal::ctrl_c().await?;
    log::info!("Received shutdown signal");
    ticker.abort();
    commands.abort();

    let node = node.lock().await;
    let pose = node.supervisor.pose_estimate();
    log::info!(
        "Stopped after {} ticks at estimated pose ({:.3}, {:.3}, {:.3})",
        node.ticks,
        pose.x,
        pose.y,
        pose.theta
    );
    Ok(())
}
