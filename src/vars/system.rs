// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.


use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// Modal state of the controller as seen by the block preview.
#[derive(Clone, Debug, PartialEq)]
pub struct ModalState {
    pub motion: u16,
    pub plane: u16,
    pub distance_mode: u16,
    pub feed_rate_mode: u16,
    pub units: u16,
    pub cutter_comp: u16,
    pub length_comp: u16,
    pub canned_cycle: u16,
    pub retract_plane: u16,
    pub scaling: u16,
    pub macro_call: u16,
    pub spindle_mode: u16,
    pub coord_system: u16,
    pub corner_mode: u16,
    pub rotation: u16,
    pub b_code: i32,
    pub d_code: i32,
    pub e_code: i32,
    pub f_code: i32,
    pub h_code: i32,
    pub m_code: i32,
    pub sequence_number: i32,
    pub program_number: i32,
    pub s_code: i32,
    pub t_code: i32,
    pub p_code: i32,
}

impl Default for ModalState {
    fn default() -> Self {
        ModalState {
            motion: 0,
            plane: 17,
            distance_mode: 90,
            feed_rate_mode: 94,
            units: 21,
            cutter_comp: 40,
            length_comp: 49,
            canned_cycle: 80,
            retract_plane: 98,
            scaling: 50,
            macro_call: 67,
            spindle_mode: 97,
            coord_system: 54,
            corner_mode: 64,
            rotation: 69,
            b_code: 0,
            d_code: 0,
            e_code: 0,
            f_code: 0,
            h_code: 0,
            m_code: 0,
            sequence_number: 0,
            program_number: 0,
            s_code: 0,
            t_code: 0,
            p_code: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Controller fields that are reachable through system variables.
#[derive(Clone, Debug, PartialEq)]
pub struct SystemParameters {
    /// Bit 0: single block stop is suppressed.
    pub suppress_single_block: u16,
    pub boring_shift_direction: i32,
    pub peck_clearance: f64,
    pub peck_retraction: f64,
    /// End point of the block being previewed.
    pub preview_position: Position,
    pub preview_modal: ModalState,
}

impl Default for SystemParameters {
    fn default() -> Self {
        SystemParameters {
            suppress_single_block: 0,
            boring_shift_direction: 1,
            peck_clearance: 1.0,
            peck_retraction: 3.0,
            preview_position: Position { x: f64::MAX, y: f64::MAX, z: f64::MAX },
            preview_modal: ModalState::default(),
        }
    }
}

impl SystemParameters {
    pub fn suppresses_single_block(&self) -> bool {
        self.suppress_single_block & 1 != 0
    }

    pub fn get(&self, var: SystemVariable) -> f64 {
        use SystemVariable::*;
        let m = &self.preview_modal;
        match var {
            SuppressSingleBlock => self.suppress_single_block as f64,
            MotionGroup => m.motion as f64,
            PlaneGroup => m.plane as f64,
            DistanceGroup => m.distance_mode as f64,
            FeedModeGroup => m.feed_rate_mode as f64,
            UnitsGroup => m.units as f64,
            CutterCompGroup => m.cutter_comp as f64,
            LengthCompGroup => m.length_comp as f64,
            CannedCycleGroup => m.canned_cycle as f64,
            RetractGroup => m.retract_plane as f64,
            ScalingGroup => m.scaling as f64,
            MacroCallGroup => m.macro_call as f64,
            SpindleModeGroup => m.spindle_mode as f64,
            CoordSystemGroup => m.coord_system as f64,
            CornerGroup => m.corner_mode as f64,
            RotationGroup => m.rotation as f64,
            BCode => m.b_code as f64,
            DCode => m.d_code as f64,
            ECode => m.e_code as f64,
            FCode => m.f_code as f64,
            HCode => m.h_code as f64,
            MCode => m.m_code as f64,
            SequenceNumber => m.sequence_number as f64,
            ProgramNumber => m.program_number as f64,
            SCode => m.s_code as f64,
            TCode => m.t_code as f64,
            PCode => m.p_code as f64,
            PreviewX => self.preview_position.x,
            PreviewY => self.preview_position.y,
            PreviewZ => self.preview_position.z,
            PeckRetraction => self.peck_retraction,
            PeckClearance => self.peck_clearance,
            BoringShift => self.boring_shift_direction as f64,
        }
    }

    /// Store a value; integer fields drop the fractional part.
    pub fn set(&mut self, var: SystemVariable, value: f64) {
        use SystemVariable::*;
        let m = &mut self.preview_modal;
        match var {
            SuppressSingleBlock => self.suppress_single_block = value as u16,
            MotionGroup => m.motion = value as u16,
            PlaneGroup => m.plane = value as u16,
            DistanceGroup => m.distance_mode = value as u16,
            FeedModeGroup => m.feed_rate_mode = value as u16,
            UnitsGroup => m.units = value as u16,
            CutterCompGroup => m.cutter_comp = value as u16,
            LengthCompGroup => m.length_comp = value as u16,
            CannedCycleGroup => m.canned_cycle = value as u16,
            RetractGroup => m.retract_plane = value as u16,
            ScalingGroup => m.scaling = value as u16,
            MacroCallGroup => m.macro_call = value as u16,
            SpindleModeGroup => m.spindle_mode = value as u16,
            CoordSystemGroup => m.coord_system = value as u16,
            CornerGroup => m.corner_mode = value as u16,
            RotationGroup => m.rotation = value as u16,
            BCode => m.b_code = value as i32,
            DCode => m.d_code = value as i32,
            ECode => m.e_code = value as i32,
            FCode => m.f_code = value as i32,
            HCode => m.h_code = value as i32,
            MCode => m.m_code = value as i32,
            SequenceNumber => m.sequence_number = value as i32,
            ProgramNumber => m.program_number = value as i32,
            SCode => m.s_code = value as i32,
            TCode => m.t_code = value as i32,
            PCode => m.p_code = value as i32,
            PreviewX => self.preview_position.x = value,
            PreviewY => self.preview_position.y = value,
            PreviewZ => self.preview_position.z = value,
            PeckRetraction => self.peck_retraction = value,
            PeckClearance => self.peck_clearance = value,
            BoringShift => self.boring_shift_direction = value as i32,
        }
    }
}

/// A system variable with a fixed number.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display, EnumIter)]
pub enum SystemVariable {
    SuppressSingleBlock,
    MotionGroup,
    PlaneGroup,
    DistanceGroup,
    FeedModeGroup,
    UnitsGroup,
    CutterCompGroup,
    LengthCompGroup,
    CannedCycleGroup,
    RetractGroup,
    ScalingGroup,
    MacroCallGroup,
    SpindleModeGroup,
    CoordSystemGroup,
    CornerGroup,
    RotationGroup,
    BCode,
    DCode,
    ECode,
    FCode,
    HCode,
    MCode,
    SequenceNumber,
    ProgramNumber,
    SCode,
    TCode,
    PCode,
    PreviewX,
    PreviewY,
    PreviewZ,
    PeckRetraction,
    PeckClearance,
    BoringShift,
}

impl SystemVariable {
    pub fn id(self) -> u16 {
        use SystemVariable::*;
        match self {
            SuppressSingleBlock => 3003,
            MotionGroup => 4201,
            PlaneGroup => 4202,
            DistanceGroup => 4203,
            // 4204 is not bound
            FeedModeGroup => 4205,
            UnitsGroup => 4206,
            CutterCompGroup => 4207,
            LengthCompGroup => 4208,
            CannedCycleGroup => 4209,
            RetractGroup => 4210,
            ScalingGroup => 4211,
            MacroCallGroup => 4212,
            SpindleModeGroup => 4213,
            CoordSystemGroup => 4214,
            CornerGroup => 4215,
            RotationGroup => 4216,
            BCode => 4302,
            DCode => 4307,
            ECode => 4308,
            FCode => 4309,
            HCode => 4311,
            MCode => 4313,
            SequenceNumber => 4314,
            ProgramNumber => 4315,
            SCode => 4319,
            TCode => 4320,
            PCode => 4330,
            PreviewX => 5001,
            PreviewY => 5002,
            PreviewZ => 5003,
            PeckRetraction => 5114,
            PeckClearance => 5115,
            BoringShift => 5148,
        }
    }

    pub fn from_id(id: u16) -> Option<Self> {
        Self::iter().find(|var| var.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_unique() {
        let mut ids: Vec<u16> = SystemVariable::iter().map(SystemVariable::id).collect();
        let len = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), len);
        assert_eq!(SystemVariable::from_id(4204), None);
        assert_eq!(SystemVariable::from_id(5148), Some(SystemVariable::BoringShift));
        assert_eq!(SystemVariable::from_id(5114).map(|v| v.to_string()),
                   Some("PeckRetraction".into()));
    }

    #[test]
    fn test_integer_fields_truncate() {
        let mut params = SystemParameters::default();
        params.set(SystemVariable::FCode, 120.75);
        assert_eq!(params.preview_modal.f_code, 120);
        params.set(SystemVariable::PreviewZ, -2.5);
        assert_eq!(params.get(SystemVariable::PreviewZ), -2.5);
        params.set(SystemVariable::SuppressSingleBlock, 1.0);
        assert!(params.suppresses_single_block());
    }
}
