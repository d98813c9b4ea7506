//! Theoretical background.
//!
//! # Contents
//! - [Background](#background)
//! - [Units](#units)
//! - [Fractal potentials](#fractal-potentials)
//! - [Initial states](#initial-states)
//! - [Time dependence](#time-dependence)
//!
//! # Background
//! The system of interest is a single particle of mass *m* moving in a plane
//! under a static, conservative potential *V*(*x*, *y*). Its state is a
//! complex wavefunction *ψ*(*x*, *y*, *t*) obeying the time-dependent
//! Schrödinger equation (TDSE)
//! ```text
//!     ∂ψ      ħ²
//! i ħ -- = - --- (∂²/∂x² + ∂²/∂y²) ψ + V ψ
//!     ∂t     2 m
//! ```
//! with |*ψ*|² giving the probability density of finding the particle at a
//! particular point.
//!
//! Space is discretized on a uniform `cols × rows` grid of unit spacing, with
//! all fields stored row-major so that cell (*x*, *y*) lives at flat index
//! `y * cols + x`. Since all quantities are sampled on the same grid and the
//! cell area is 1, the total probability is simply
//! ```text
//! P = Σ (re[i]² + im[i]²)
//! ```
//! over every cell *i*; no quadrature weights are applied.
//!
//! # Units
//! Lengths are measured in cells and time in units of the time step's own
//! scale; *ħ* and *m* are left as free parameters rather than being scaled
//! away. With the default values (*ħ* = 1, *m* = 20) the kinetic coefficient
//! *ħ*/2 *m* is small compared to typical potential heights of a few units, so
//! that packets move slowly across the grid and interact strongly with the
//! landscape.
//!
//! # Fractal potentials
//! Potential landscapes are generated by midpoint displacement, sometimes
//! called the diamond-square algorithm. Working on a square lattice of edge
//! *N* + 1 with *N* a power of two, the four corners are seeded with uniform
//! random values on \[0, 1), and then the lattice is repeatedly subdivided.
//! At each level with coarse step *s* and half-step *h* = *s*/2:
//!
//! - **Diamond**: the center of each coarse cell is set to the average of its
//!   four corners plus a random perturbation.
//! - **Square**: each edge midpoint is set to the average of its four
//!   orthogonal neighbors at distance *h* (wrapping around modulo *N*) plus a
//!   random perturbation.
//!
//! Perturbations are uniform on \[-*δ*/2, *δ*/2), where *δ* starts at 1 and is
//! divided by the roughness factor *r* = 2 + *c*/4 after each level, with *c*
//! the user-facing complexity. Larger *r* suppresses fine structure.
//! ```text
//!  level s:          diamond:          square:
//!  o . . . o         o . . . o         o . o . o
//!  . . . . .         . . . . .         . . . . .
//!  . . . . .   -->   . . x . .   -->   o . o . o
//!  . . . . .         . . . . .         . . . . .
//!  o . . . o         o . . . o         o . o . o
//! ```
//! The grid used for simulation is cut from the top-left corner of the
//! lattice, and its values are rescaled linearly so that the lowest cell sits
//! at 0 and the highest at the requested height.
//!
//! Edge midpoints are only written while they still hold exactly 0, which is
//! how they are recognized as unvisited. A midpoint whose average plus
//! perturbation happens to come out at exactly 0 is indistinguishable from an
//! unvisited one; in practice, with continuous random draws, this does not
//! occur.
//!
//! # Initial states
//! The initial state is a Gaussian envelope centered at (*x*₀, *y*₀) with
//! widths *σ*<sub>*x*</sub>, *σ*<sub>*y*</sub>, multiplied by a plane wave
//! with wavevector (*k*<sub>*x*</sub>, *k*<sub>*y*</sub>):
//! ```text
//!                  (x - x₀)²   (y - y₀)²     i (kx (x - x₀) + ky (y - y₀))
//! ψ(x, y) ∝ exp(- --------- - ---------) e
//!                   2 σx²       2 σy²
//! ```
//! After sampling, the field is divided by the square root of its total
//! probability. A field that samples to zero everywhere (e.g. a packet
//! centered far off the grid) is left as-is.
//!
//! # Time dependence
//! Writing *ψ* = *R* + *i* *I* and splitting the TDSE into real and
//! imaginary parts gives a pair of coupled real equations,
//! ```text
//! ∂I     ħ            V
//! -- = ---- ∇² R  -  --- R
//! ∂t    2 m           ħ
//!
//! ∂R       ħ            V
//! -- = - ---- ∇² I  +  --- I
//! ∂t      2 m           ħ
//! ```
//! The Laplacian is replaced by the 5-point stencil
//! ```text
//! ∇² f[x, y] ≈ f[x + 1, y] + f[x - 1, y] + f[x, y + 1] + f[x, y - 1] - 4 f[x, y]
//! ```
//! and the two equations are stepped alternately, each using the most recent
//! value of the other component:
//! ```text
//! I ← I + dt (C₁ ∇² R - C₂ V R)
//! R ← R - dt (C₁ ∇² I - C₂ V I)      (using the I just computed)
//!
//! C₁ = ħ / 2 m,  C₂ = 1 / ħ
//! ```
//! This places *I* half a step ahead of *R* and makes the scheme symplectic:
//! rather than slowly growing, as a naive forward-Euler update of the complex
//! field would, errors in the total probability stay bounded and oscillate.
//! The price is a stability limit. On a unit grid the largest eigenvalue of
//! the discrete Hamiltonian is *E*<sub>max</sub> = 4 *ħ*²/*m* +
//! *V*<sub>max</sub>, and the scheme stays bounded only if
//! ```text
//! dt ≤ 2 ħ / E_max
//! ```
//! No check is made while stepping; choosing `dt` is the caller's
//! responsibility.
//!
//! Cells on the outermost ring of the grid are never updated and so hold
//! whatever values they were initialized with. This behaves as a fixed
//! (Dirichlet) boundary: it neither absorbs outgoing probability nor treats
//! reflection specially.
