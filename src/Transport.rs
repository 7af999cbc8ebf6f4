/// collision-integral database: name-keyed cached groups and derived
/// transport quantities (viscosity and diffusion numerators)
/// # Example
/// ```
/// use MixTran::Transport::collision_db::CollisionDatabase;
/// use MixTran::Transport::collision_pairs::SpeciesPair;
/// use MixTran::Transport::mixture_state::MixtureState;
/// use MixTran::Transport::transport_settings::TransportDbSettings;
///
/// // 1 electron + 2 heavy species, single temperature
/// let mut state = MixtureState::with_electrons(vec![0.028, 0.032]).unwrap();
/// state.set_temperature(4000.0).unwrap();
///
/// // the pair correlation is an external collaborator; any closure works
/// let mut db = CollisionDatabase::new(
///     TransportDbSettings::new(),
///     &state,
///     Box::new(|_pair: &SpeciesPair, _kind: &str, t: f64| 1.0e-20 * t.sqrt()),
/// )
/// .unwrap();
///
/// let group = db.group("Q22ii", &state).unwrap();
/// assert_eq!(group.size(), 2);
///
/// let etai = db.etai(&state).unwrap();
/// assert!(etai.iter().all(|&x| x > 0.0));
/// ```
pub mod collision_db;
/// cached, optionally tabulated group of collision integrals for one
/// integral kind over one species-pair subset
pub mod collision_group;
/// species-pair index in triangular order and mass/constant factor
/// precomputation
pub mod collision_pairs;
/// minimal owned thermodynamic state for tests and simple callers
pub mod mixture_state;
/// common error type, collaborator traits and validation helpers
pub mod transport_api;
/// tabulation settings record with serde defaults and validation
pub mod transport_settings;
