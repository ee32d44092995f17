//! Defines the [`Memory`] type, responsible for representing the memory of an LS-8
//! virtual machine.
//!
//! # Flat Memory
//!
//! The LS-8 machine addresses a single flat array of 256 byte-wide cells. There is
//! no paging, no segmentation and no memory-mapped I/O: programs are loaded at
//! address zero and the stack grows downward from the high end of the same array.
//!
//! Reads and writes are bounds-checked. An address outside of the array is a
//! programming error on the part of the running program and surfaces as
//! [`Error::OutOfRangeAddress`] rather than wrapping silently.

use crate::error::Error;

/// The number of cells in the memory of an LS-8 machine.
pub const MEMORY_SIZE: usize = 256;

/// Represents the memory of the LS-8 virtual machine.
///
/// More information on memory can be found in the [module-level documentation](self).
#[derive(Debug, Clone)]
pub struct Memory {
    /// The cells backing the machine's address space.
    cells: [u8; MEMORY_SIZE],
}

impl Memory {
    /// Creates a new [`Memory`] with every cell zeroed.
    #[inline]
    pub const fn new() -> Self {
        Self {
            cells: [0; MEMORY_SIZE],
        }
    }

    /// Reads the byte stored at `address`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRangeAddress`] if `address` is outside of the machine's
    /// address space.
    #[inline]
    pub fn read(&self, address: usize) -> Result<u8, Error> {
        self.cells
            .get(address)
            .copied()
            .ok_or(Error::OutOfRangeAddress { address })
    }

    /// Writes `value` into the cell at `address`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRangeAddress`] if `address` is outside of the machine's
    /// address space.
    #[inline]
    pub fn write(&mut self, address: usize, value: u8) -> Result<(), Error> {
        match self.cells.get_mut(address) {
            Some(cell) => {
                *cell = value;
                Ok(())
            }
            None => Err(Error::OutOfRangeAddress { address }),
        }
    }

    /// Reads the byte stored at `address`, if the address exists.
    ///
    /// This is the infallible probe used for diagnostic display; prefer
    /// [`read`](Self::read) when executing instructions.
    #[inline]
    pub fn get(&self, address: usize) -> Option<u8> {
        self.cells.get(address).copied()
    }

    /// Copies a program image into memory starting at address zero.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRangeAddress`] if the image does not fit in the machine's
    /// address space.
    pub fn load(&mut self, image: &[u8]) -> Result<(), Error> {
        let cells = self
            .cells
            .get_mut(..image.len())
            .ok_or(Error::OutOfRangeAddress {
                address: MEMORY_SIZE,
            })?;
        cells.copy_from_slice(image);
        Ok(())
    }
}

impl Default for Memory {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn read_back_written_value() {
        let mut memory = Memory::new();
        memory.write(0x10, 0xAA).unwrap();
        assert_eq!(memory.read(0x10), Ok(0xAA));
    }

    #[test]
    fn out_of_range_access_is_rejected() {
        let mut memory = Memory::new();
        assert_eq!(
            memory.read(256),
            Err(Error::OutOfRangeAddress { address: 256 })
        );
        assert_eq!(
            memory.write(1000, 1),
            Err(Error::OutOfRangeAddress { address: 1000 })
        );
        assert_eq!(memory.get(256), None);
    }

    #[test]
    fn load_places_image_at_address_zero() {
        let mut memory = Memory::new();
        memory.load(&[1, 2, 3]).unwrap();
        assert_eq!(memory.read(0), Ok(1));
        assert_eq!(memory.read(2), Ok(3));
        assert_eq!(memory.read(3), Ok(0));
    }

    #[test]
    fn oversized_image_is_rejected() {
        let mut memory = Memory::new();
        let image = [0u8; MEMORY_SIZE + 1];
        assert_eq!(
            memory.load(&image),
            Err(Error::OutOfRangeAddress {
                address: MEMORY_SIZE
            })
        );
    }
}
