pub mod stateless_llm_interface;
pub mod openai_compatible_llm;
pub mod factory;

pub use stateless_llm_interface::*;
pub use openai_compatible_llm::*;
pub use factory::StatelessLLMFactory;
