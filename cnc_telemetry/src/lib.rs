use std::fmt;

use serde::{Deserialize, Serialize};

/// Top-level telemetry document as served by the machine endpoint.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct TelemetryDocument {
    pub cnc_machine: MachineSnapshot,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct AxisReading {
    pub min_position: f32,
    pub max_position: f32,
    pub current_position: f32,
    pub units: String,
}

impl fmt::Display for AxisReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} (range: {} - {} {})",
            self.current_position, self.units, self.min_position, self.max_position, self.units
        )
    }
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Axes {
    pub x: AxisReading,
    pub y: AxisReading,
    pub z: AxisReading,
    pub a: AxisReading,
    pub c: AxisReading,
}

impl Axes {
    pub fn named(&self) -> [(&'static str, &AxisReading); 5] {
        [
            ("X", &self.x),
            ("Y", &self.y),
            ("Z", &self.z),
            ("A", &self.a),
            ("C", &self.c),
        ]
    }
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct SpindleReading {
    pub position: f32,
    pub speed: i32,
    pub units: String,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct ToolChangerState {
    pub current_tool: i32,
    pub position: String,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct WorkpieceZero {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct MachineSnapshot {
    pub machine_id: String,
    pub model: String,
    pub axes: Axes,
    pub spindle: SpindleReading,
    pub tool_changer: ToolChangerState,
    pub workpiece_zero: WorkpieceZero,
    pub timestamp: String,
    pub status: String,
}

impl MachineSnapshot {
    /// Emits every field as structured events, grouped the way operators read them.
    pub fn log(&self) {
        tracing::info!(
            machine_id = %self.machine_id,
            model = %self.model,
            status = %self.status,
            timestamp = %self.timestamp,
            "CNC machine info"
        );

        for (name, axis) in self.axes.named() {
            tracing::info!(
                axis = name,
                current = axis.current_position,
                min = axis.min_position,
                max = axis.max_position,
                units = %axis.units,
                "{name} axis: {axis}"
            );
        }

        tracing::info!(
            spindle_position = self.spindle.position,
            spindle_speed = self.spindle.speed,
            spindle_units = %self.spindle.units,
            tool = self.tool_changer.current_tool,
            changer_position = %self.tool_changer.position,
            zero_x = self.workpiece_zero.x,
            zero_y = self.workpiece_zero.y,
            zero_z = self.workpiece_zero.z,
            "System parameters"
        );
    }
}
