//! Console walk-throughs, one per pattern. Output is illustrative only.

use std::rc::Rc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use colored::Colorize;

use crate::behavioral::chain::{self, DogHandler, Handler, MonkeyHandler, SquirrelHandler};
use crate::behavioral::iterator::Container;
use crate::behavioral::mediator::{Component1, Component2, ConcreteMediator};
use crate::behavioral::memento::{Caretaker, TextOriginator};
use crate::behavioral::observer::{MessageObserver, Subject};
use crate::behavioral::state::{ConcreteStateA, Context};
use crate::behavioral::visitor::{
    self, ConcreteComponentA, ConcreteComponentB, ConcreteVisitor1, ConcreteVisitor2,
};
use crate::config::{DemoConfig, PatternKind};
use crate::creational::abstract_factory::{self, Brand};
use crate::creational::factory_method::{creator_for, InstrumentCreator, InstrumentKind};
use crate::creational::singleton::{self, Singleton};
use crate::error::Result;
use crate::structural::adapter::{Adaptee, Adapter, DefaultTarget, Target};
use crate::structural::bridge::{
    Abstraction, BasicAbstraction, ConcreteImplementationA, ConcreteImplementationB,
    ExtendedAbstraction, Implementation,
};
use crate::structural::composite::{Component, Composite, Leaf};
use crate::structural::flyweight::{add_car_to_police_database, FlyweightFactory, SharedState};
use crate::structural::proxy::{self, Proxy, RealSubject};

pub fn run(kind: PatternKind, config: &DemoConfig) -> Result<()> {
    println!("{}", format!("=== {kind} ===").bold().cyan());
    match kind {
        PatternKind::ChainOfResponsibility => chain_of_responsibility(),
        PatternKind::Iterator => iterator(),
        PatternKind::Memento => memento(config),
        PatternKind::Observer => observer()?,
        PatternKind::Visitor => visitor(),
        PatternKind::Mediator => mediator()?,
        PatternKind::State => state()?,
        PatternKind::AbstractFactory => abstract_factory(),
        PatternKind::FactoryMethod => factory_method(),
        PatternKind::Singleton => singleton(config),
        PatternKind::Adapter => adapter(),
        PatternKind::Bridge => bridge(),
        PatternKind::Composite => composite()?,
        PatternKind::Flyweight => flyweight(config),
        PatternKind::Proxy => proxy(),
    }
    println!();
    Ok(())
}

fn client_says(line: &str) {
    println!("{}", line.yellow());
}

fn chain_of_responsibility() {
    let monkey = MonkeyHandler::new();
    let squirrel = SquirrelHandler::new();
    monkey.set_next(squirrel.clone()).set_next(DogHandler::new());

    let food = ["Nut", "Banana", "Cup of coffee"];
    let entries: [(&str, &dyn Handler); 2] = [
        ("Chain: Monkey > Squirrel > Dog", &*monkey),
        ("Subchain: Squirrel > Dog", &*squirrel),
    ];
    for (title, head) in entries {
        client_says(title);
        for (request, result) in chain::offer_all(head, &food) {
            println!("Client: Who wants a {request}?");
            match result {
                Some(answer) => print!("  {}", answer.green()),
                None => println!("  {}", format!("{request} was left untouched.").dimmed()),
            }
        }
    }
}

fn iterator() {
    let numbers = Container::new();
    for i in 0..10 {
        numbers.add(i);
    }
    client_says("Iterator with int");
    let mut cursor = numbers.create_iterator();
    cursor.first();
    while !cursor.is_done() {
        if let Ok(Some(value)) = cursor.current() {
            println!("{value}");
        }
        cursor.next_item();
    }

    #[derive(Debug, Clone)]
    struct Data {
        value: i32,
    }

    client_says("Iterator with a custom type");
    let data = Container::new();
    for value in [100, 1000, 10000] {
        data.add(Data { value });
    }
    for item in data.create_iterator() {
        println!("{}", item.value);
    }
}

fn memento(config: &DemoConfig) {
    let originator = TextOriginator::new(config.memento.initial_state.clone())
        .with_generated_len(config.memento.generated_len);
    println!("Originator: My initial state is: {}", originator.state());
    let mut caretaker = Caretaker::new(originator);

    for _ in 0..3 {
        println!("Caretaker: Saving Originator's state...");
        caretaker.backup();
        let state = caretaker.originator_mut().do_something();
        println!("Originator: and my state has changed to: {state}");
    }

    println!("Caretaker: Here's the list of mementos:");
    for name in caretaker.history() {
        println!("  {}", name.dimmed());
    }

    for label in ["Client: Now, let's rollback!", "Client: Once more!"] {
        client_says(label);
        if let Some(name) = caretaker.undo() {
            println!("Caretaker: Restoring state to: {name}");
            println!("Originator: My state has changed to: {}", caretaker.originator().state());
        }
    }
}

fn observer() -> Result<()> {
    let subject = Subject::new();
    subject.create_message("Welcome! :D");
    let observers: Vec<Rc<MessageObserver>> =
        (0..3).map(|_| MessageObserver::new(&subject)).collect();
    for observer in &observers {
        println!("Hi, I'm the Observer \"{}\".", observer.number());
        observer.attach_to_subject()?;
    }

    observers[0].remove_me_from_the_list()?;
    println!("Observer \"{}\" removed from the list.", observers[0].number());
    subject.create_message("Hello there!");
    report_observers(&subject, &observers);

    observers[1].remove_me_from_the_list()?;
    println!("Observer \"{}\" removed from the list.", observers[1].number());
    subject.some_business_logic();
    report_observers(&subject, &observers);
    Ok(())
}

fn report_observers(subject: &Subject, observers: &[Rc<MessageObserver>]) {
    println!("There are {} observers in the list.", subject.observer_count());
    for observer in observers {
        let message = observer.last_message().unwrap_or_default();
        println!(
            "Observer \"{}\": latest message --> {}",
            observer.number(),
            message.green()
        );
    }
}

fn visitor() {
    let components: Vec<Box<dyn visitor::Component>> =
        vec![Box::new(ConcreteComponentA), Box::new(ConcreteComponentB)];

    client_says("The client code works with all visitors via the base Visitor interface:");
    let mut first = ConcreteVisitor1::default();
    visitor::visit_all(&components, &mut first);
    first.lines.iter().for_each(|line| println!("{line}"));

    client_says("It allows the same client code to work with different types of visitors:");
    let mut second = ConcreteVisitor2::default();
    visitor::visit_all(&components, &mut second);
    second.lines.iter().for_each(|line| println!("{line}"));
}

fn mediator() -> Result<()> {
    let c1 = Component1::new();
    let c2 = Component2::new();
    let _mediator = ConcreteMediator::wire(&c1, &c2);

    client_says("Client triggers operation A.");
    c1.do_a()?;
    client_says("Client triggers operation D.");
    c2.do_d()?;

    println!("Component 1 did: {}", c1.base().journal().join(", "));
    println!("Component 2 did: {}", c2.base().journal().join(", "));
    Ok(())
}

fn state() -> Result<()> {
    let context = Context::new();
    context.transition_to(Box::new(ConcreteStateA::default()));
    context.request1()?;
    context.request2()?;
    println!("Context went through: {}", context.transitions().join(" -> "));
    Ok(())
}

fn abstract_factory() {
    for (label, brand) in [
        ("Client: Testing client code with the first factory type:", Brand::Toyota),
        ("Client: Testing the same client code with the second factory type:", Brand::Honda),
    ] {
        client_says(label);
        let factory = abstract_factory::factory_for(brand);
        for line in abstract_factory::showcase(factory.as_ref()) {
            println!("{line}");
        }
    }
}

fn factory_method() {
    for kind in InstrumentKind::ALL {
        client_says(&format!("App: Launched with the {kind:?} creator."));
        let creator: Box<dyn InstrumentCreator> = creator_for(kind);
        println!("WritingClient: I'm oblivious to the creator's class, but it still works.");
        println!("{}", creator.scribble());
    }
}

fn singleton(config: &DemoConfig) {
    println!("If you see the same value, then singleton was reused (yay!)");
    println!("If you see different values, then 2 singletons were created (booo!!)");
    client_says("RESULT:");

    let delay = Duration::from_millis(config.singleton.startup_delay_ms);
    let handles: Vec<_> = config
        .singleton
        .values
        .iter()
        .cloned()
        .map(|value| {
            thread::spawn(move || {
                // Emulates slow initialisation.
                thread::sleep(delay);
                singleton::get_instance(&value)
            })
        })
        .collect();

    let mut instances: Vec<Arc<Singleton>> = Vec::new();
    let mut panicked = 0;
    for handle in handles {
        match handle.join() {
            Ok(instance) => instances.push(instance),
            Err(_) => {
                tracing::error!("racing thread panicked before returning an instance");
                panicked += 1;
            }
        }
    }
    for instance in &instances {
        println!("{}", instance.value());
    }
    match race_outcome(&instances, panicked) {
        RaceOutcome::OneInstance => println!("{}", "one instance".green()),
        RaceOutcome::SeveralInstances => println!("{}", "several instances".red()),
        RaceOutcome::Incomplete { panicked } => {
            println!("{}", format!("{panicked} racing thread(s) panicked").red())
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum RaceOutcome {
    OneInstance,
    SeveralInstances,
    Incomplete { panicked: usize },
}

/// A race only proves sharing when every thread came back.
fn race_outcome(instances: &[Arc<Singleton>], panicked: usize) -> RaceOutcome {
    if panicked > 0 {
        return RaceOutcome::Incomplete { panicked };
    }
    match instances.first() {
        Some(first) if !instances.iter().all(|i| Arc::ptr_eq(first, i)) => {
            RaceOutcome::SeveralInstances
        }
        _ => RaceOutcome::OneInstance,
    }
}

fn adapter() {
    client_says("Client: I can work just fine with the Target objects:");
    println!("{}", DefaultTarget.request());

    let adaptee = Rc::new(Adaptee);
    client_says("Client: The Adaptee class has a weird interface. See, I don't understand it:");
    println!("Adaptee: {}", adaptee.specific_request());

    client_says("Client: But I can work with it via the Adapter:");
    println!("{}", Adapter::new(adaptee).request());
}

fn bridge() {
    let a: Rc<dyn Implementation> = Rc::new(ConcreteImplementationA);
    let b: Rc<dyn Implementation> = Rc::new(ConcreteImplementationB);
    let abstractions: [Box<dyn Abstraction>; 3] = [
        Box::new(BasicAbstraction::new(a)),
        Box::new(BasicAbstraction::new(b.clone())),
        Box::new(ExtendedAbstraction::new(b)),
    ];
    for abstraction in &abstractions {
        print!("{}", abstraction.operation());
    }
}

fn composite() -> Result<()> {
    let simple: Rc<dyn Component> = Leaf::new();
    client_says("Client: I've got a simple component:");
    println!("RESULT: {}", simple.operation());

    let tree: Rc<dyn Component> = Composite::new();
    let branch1: Rc<dyn Component> = Composite::new();
    branch1.add(Leaf::new())?;
    branch1.add(Leaf::new())?;
    let branch2: Rc<dyn Component> = Composite::new();
    branch2.add(Leaf::new())?;
    tree.add(branch1)?;
    tree.add(branch2)?;
    client_says("Client: Now I've got a composite tree:");
    println!("RESULT: {}", tree.operation());

    client_says(
        "Client: I don't need to check the components classes even when managing the tree:",
    );
    if tree.is_composite() {
        tree.add(simple)?;
    }
    println!("RESULT: {}", tree.operation());
    Ok(())
}

fn flyweight(config: &DemoConfig) {
    let mut factory = FlyweightFactory::new(config.flyweight.seed.iter().cloned());
    list_flyweights(&factory);

    for model in ["M5", "X1"] {
        client_says("Client: Adding a car to the database.");
        let line = add_car_to_police_database(
            &mut factory,
            "CL234IR",
            "James Doe",
            SharedState::new("BMW", model, "red"),
        );
        println!("{line}");
    }
    list_flyweights(&factory);
}

fn list_flyweights(factory: &FlyweightFactory) {
    println!("FlyweightFactory: I have {} flyweights:", factory.count());
    for key in factory.keys() {
        println!("  {key}");
    }
}

fn proxy() {
    use proxy::Subject as _;

    let real = Rc::new(RealSubject);
    client_says("Client: Executing the client code with a real subject:");
    println!("{}", real.request());

    client_says("Client: Executing the same client code with a proxy:");
    let proxy = Proxy::new(real);
    println!("{}", proxy.request());
    println!("Proxy logged {} request(s).", proxy.access_log().len());
}
