use std::{cell::{Ref, RefCell, RefMut}, rc::Rc};

/// Shared mutable cell. Cloning is shallow: both handles alias one value.
///
/// The environment chain and array objects both need many owners with
/// interior mutability, so `Rc<RefCell<T>>` shows up in a lot of signatures.
/// This wrapper keeps those signatures readable.
#[derive(Debug, Default)]
pub struct RcCell<T> {
	inner: Rc<RefCell<T>>,
}

impl<T> Clone for RcCell<T> {
	fn clone(&self) -> Self { Self { inner: self.inner.clone() } }
}

impl<T> RcCell<T> {
	pub fn new(value: T) -> Self { Self { inner: Rc::new(RefCell::new(value)) } }

	pub fn borrow(&self) -> Ref<'_, T> { self.inner.borrow() }

	pub fn borrow_mut(&self) -> RefMut<'_, T> { self.inner.borrow_mut() }

	/// True when both handles point at the same cell, regardless of contents.
	pub fn ptr_eq(&self, other: &Self) -> bool { Rc::ptr_eq(&self.inner, &other.inner) }
}

impl<T> From<T> for RcCell<T> {
	fn from(value: T) -> Self { Self::new(value) }
}

/// Writing into a shared byte buffer: output lands in the cell and stays
/// readable through every other handle. Tests capture interpreter output
/// this way.
impl std::io::Write for RcCell<Vec<u8>> {
	fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
		self.borrow_mut().extend_from_slice(buf);
		Ok(buf.len())
	}

	fn flush(&mut self) -> std::io::Result<()> { Ok(()) }
}
