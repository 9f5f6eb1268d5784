//! Motor actuator seam.
//!
//! The command layer only knows wheel positions, a 0..=255 speed and a run
//! mode. Whatever sits behind this trait (a motor shield, a simulator, a test
//! recorder) maps that onto real outputs.

use crate::utils::protocol::{Drive, Position};

pub trait MotorDriver {
    type Error: core::fmt::Debug;

    /// Set the PWM magnitude for one wheel without changing its run mode.
    fn set_speed(
        &mut self,
        position: Position,
        speed: u8,
    ) -> Result<(), Self::Error>;

    /// Change the run mode of one wheel.
    fn run(
        &mut self,
        position: Position,
        drive: Drive,
    ) -> Result<(), Self::Error>;

    /// Release every wheel so the robot coasts to a halt.
    fn stop_all(&mut self) -> Result<(), Self::Error> {
        for position in Position::ALL {
            self.run(position, Drive::Release)?;
        }
        Ok(())
    }
}

impl<T: MotorDriver + ?Sized> MotorDriver for &mut T {
    type Error = T::Error;

    fn set_speed(
        &mut self,
        position: Position,
        speed: u8,
    ) -> Result<(), Self::Error> {
        (**self).set_speed(position, speed)
    }

    fn run(
        &mut self,
        position: Position,
        drive: Drive,
    ) -> Result<(), Self::Error> {
        (**self).run(position, drive)
    }

    fn stop_all(&mut self) -> Result<(), Self::Error> {
        (**self).stop_all()
    }
}
