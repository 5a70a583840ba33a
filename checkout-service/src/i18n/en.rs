//! English storefront strings.

pub(super) const ENTRIES: &[(&str, &str)] = &[
    ("nav.home", "Home"),
    ("nav.contact", "Contact"),
    ("nav.cart", "Cart"),

    ("product.addToCart", "Add to Cart"),
    ("product.buyNow", "Buy Now"),
    ("product.price", "Price"),
    ("product.description", "Description"),
    ("product.reviews", "Reviews"),
    ("product.inStock", "In Stock"),
    ("product.outOfStock", "Out of Stock"),

    ("cart.title", "Shopping Cart"),
    ("cart.empty", "No Cart Items Found"),
    ("cart.continueShopping", "Continue Shopping"),
    ("cart.product", "Product"),
    ("cart.price", "Price"),
    ("cart.quantity", "Quantity"),
    ("cart.subtotal", "Subtotal"),
    ("cart.shipping", "Shipping"),
    ("cart.total", "Total"),
    ("cart.clearCart", "Clear Cart"),
    ("cart.proceedToCheckout", "Proceed to Checkout"),
    ("cart.flatRate", "Flat rate"),
    ("cart.localPickup", "Local pickup"),
    ("cart.freeShipping", "Free shipping"),
    ("cart.remove", "Remove"),
    ("cart.addMoreForFreeShipping", "Add ${{amount}} more to qualify for free shipping"),
    ("cart.eligibleForFreeShipping", "You are eligible for free shipping"),

    ("contact.title", "Keep In Touch with Us"),
    ("contact.sendMessage", "Send A Message"),
    ("contact.yourName", "Your Name"),
    ("contact.yourEmail", "Your Email"),
    ("contact.subject", "Subject"),
    ("contact.yourMessage", "Your Message"),
    ("contact.sendMessageBtn", "Send Message"),
    ("contact.saveInfo", "Save my name, email, and website in this browser for the next time I comment."),
    ("contact.findOnSocial", "Find on social media"),
    ("contact.writeSubject", "Write your subject"),
    ("contact.writeMessage", "Write your message here..."),
    ("contact.messageSent", "Message sent successfully!"),

    ("checkout.title", "Checkout"),
    ("checkout.shipping", "Shipping Information"),
    ("checkout.payment", "Payment Method"),
    ("checkout.review", "Review Order"),
    ("checkout.placeOrder", "Place Order"),

    ("payment.creditCard", "Credit Card"),
    ("payment.paypal", "PayPal"),
    ("payment.applePay", "Apple Pay"),
    ("payment.googlePay", "Google Pay"),
    ("payment.cod", "Cash on Delivery"),

    ("form.firstName", "First Name"),
    ("form.lastName", "Last Name"),
    ("form.email", "Email"),
    ("form.phone", "Phone"),
    ("form.address", "Address"),
    ("form.city", "City"),
    ("form.zipCode", "ZIP Code"),
    ("form.country", "Country"),

    ("message.success", "Success!"),
    ("message.error", "Error occurred"),
    ("message.loading", "Loading..."),
    ("message.orderPlaced", "Order placed successfully"),
    ("message.paymentFailed", "Payment failed"),

    ("common.save", "Save"),
    ("common.cancel", "Cancel"),
    ("common.delete", "Delete"),
    ("common.edit", "Edit"),
    ("common.view", "View"),
    ("common.search", "Search"),
    ("common.filter", "Filter"),
    ("common.sort", "Sort"),
];
