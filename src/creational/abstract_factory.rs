//! Abstract Factory: each factory builds a whole family of cars. Products
//! from one factory are meant to work together; mixing families type-checks
//! but is the caller's responsibility.

pub trait Compact {
    fn useful_function_a(&self) -> String;
}

pub trait MidSize {
    fn useful_function_b(&self) -> String;

    /// Collaborates with a compact, ideally one from the same family.
    fn another_useful_function_b(&self, collaborator: &dyn Compact) -> String;
}

pub struct Corolla;
pub struct Civic;
pub struct Camry;
pub struct Accord;

impl Compact for Corolla {
    fn useful_function_a(&self) -> String {
        "The result of the product : Toyota Corolla.".to_string()
    }
}

impl Compact for Civic {
    fn useful_function_a(&self) -> String {
        "The result of the product : Honda Civic.".to_string()
    }
}

impl MidSize for Camry {
    fn useful_function_b(&self) -> String {
        "The result of the product Toyota Camry.".to_string()
    }

    fn another_useful_function_b(&self, collaborator: &dyn Compact) -> String {
        format!(
            "The result of the B1 collaborating with ( {} )",
            collaborator.useful_function_a()
        )
    }
}

impl MidSize for Accord {
    fn useful_function_b(&self) -> String {
        "The result of the product Honda Accord.".to_string()
    }

    fn another_useful_function_b(&self, collaborator: &dyn Compact) -> String {
        format!(
            "The result of the B2 collaborating with ( {} )",
            collaborator.useful_function_a()
        )
    }
}

pub trait CarFactory {
    fn create_compact(&self) -> Box<dyn Compact>;
    fn create_midsize(&self) -> Box<dyn MidSize>;
}

pub struct ToyotaFactory;
pub struct HondaFactory;

impl CarFactory for ToyotaFactory {
    fn create_compact(&self) -> Box<dyn Compact> {
        Box::new(Corolla)
    }

    fn create_midsize(&self) -> Box<dyn MidSize> {
        Box::new(Camry)
    }
}

impl CarFactory for HondaFactory {
    fn create_compact(&self) -> Box<dyn Compact> {
        Box::new(Civic)
    }

    fn create_midsize(&self) -> Box<dyn MidSize> {
        Box::new(Accord)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Brand {
    Toyota,
    Honda,
}

pub fn factory_for(brand: Brand) -> Box<dyn CarFactory> {
    match brand {
        Brand::Toyota => Box::new(ToyotaFactory),
        Brand::Honda => Box::new(HondaFactory),
    }
}

/// Exercises a family through the abstract interfaces only.
pub fn showcase(factory: &dyn CarFactory) -> [String; 2] {
    let compact = factory.create_compact();
    let midsize = factory.create_midsize();
    [
        midsize.useful_function_b(),
        midsize.another_useful_function_b(compact.as_ref()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toyota_family() {
        let [own, collaboration] = showcase(&ToyotaFactory);
        assert_eq!(own, "The result of the product Toyota Camry.");
        assert_eq!(
            collaboration,
            "The result of the B1 collaborating with ( The result of the product : Toyota Corolla. )"
        );
    }

    #[test]
    fn test_honda_family_via_brand() {
        let [own, collaboration] = showcase(factory_for(Brand::Honda).as_ref());
        assert_eq!(own, "The result of the product Honda Accord.");
        assert!(collaboration.contains("Honda Civic"));
    }

    #[test]
    fn test_cross_family_still_type_checks() {
        let civic = HondaFactory.create_compact();
        let camry = ToyotaFactory.create_midsize();
        assert!(camry
            .another_useful_function_b(civic.as_ref())
            .contains("Honda Civic"));
    }
}
